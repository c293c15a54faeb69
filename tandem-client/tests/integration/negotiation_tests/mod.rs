mod test_offerer_path;
