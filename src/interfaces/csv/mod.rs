pub mod cart_reader;
pub mod manifest_writer;
