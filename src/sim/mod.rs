pub(crate) mod body;
pub(crate) mod boundary;
pub(crate) mod collision;
pub(crate) mod gravity;
pub(crate) mod parameters;
pub(crate) mod scenario;
pub(crate) mod system;
pub(crate) mod units;
