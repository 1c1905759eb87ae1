pub mod exoplanet_archive;
pub mod mast;
