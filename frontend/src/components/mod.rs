pub mod roaster;
