mod structs;

pub use structs::RunCache;
