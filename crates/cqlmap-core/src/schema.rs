mod mapping;
pub use mapping::{ModelMapping, TableMapping};

mod name;
pub use name::{Mappings, NameMapping};

mod table;
pub use table::{ClusteringColumn, Column, TableMetadata};
