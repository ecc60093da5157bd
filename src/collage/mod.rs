pub(crate) mod convergence;
