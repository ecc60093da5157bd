pub(crate) mod choreographer;
pub(crate) mod state;
