pub mod catalog;
pub mod extract;
pub mod merge;

pub use catalog::{ search_locations, LocationCatalog };
pub use extract::{ extract_locations, LocationBlocks };
pub use merge::{ merge_locations, to_markers, MergePolicy };
