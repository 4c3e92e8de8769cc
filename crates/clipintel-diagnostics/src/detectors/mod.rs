pub(crate) mod balance;
pub(crate) mod cadence;
pub(crate) mod cohorts;
pub(crate) mod outliers;
pub(crate) mod packaging;
