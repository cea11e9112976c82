pub mod avail;
pub mod catalog;
pub mod clash;
pub mod constants;
pub mod coords;
pub mod coverage;
pub mod earth_orientation;
pub mod healpix;
pub mod hedwig_errors;
pub mod site;
pub mod targets;
pub mod time;
