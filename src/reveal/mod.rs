pub(crate) mod locate;
pub(crate) mod observer;
pub(crate) mod oneshot;
pub(crate) mod rearm;
pub(crate) mod title;
