/// reading reaction lists from text files
pub mod load_from_file;
