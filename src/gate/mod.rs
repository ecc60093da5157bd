pub(crate) mod load_gate;
