pub mod definitions;
pub mod site;
pub mod sync_pairs;
pub mod xref;
