use crate::capture::MediaConstraints;
use tandem_core::IceServerConfig;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub ice_servers: Vec<IceServerConfig>,
    pub constraints: MediaConstraints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ice_servers: IceServerConfig::default_stun(),
            constraints: MediaConstraints::default(),
        }
    }
}
