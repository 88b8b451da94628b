pub mod place_saver;
