pub mod lead;
pub mod search_criteria;
pub mod warning;
