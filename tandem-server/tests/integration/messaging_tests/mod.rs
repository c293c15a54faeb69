mod test_full_peer_cycle;
