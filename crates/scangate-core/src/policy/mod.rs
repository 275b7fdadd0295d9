pub mod bundle;
pub mod verdict;
