mod avl_tree;
mod find;
mod insert;
mod remove;
mod rotate;
mod walker;

pub use avl_tree::AvlArena;
pub(crate) use avl_tree::Node;
pub use insert::InsertError;
pub use walker::NodeWalker;
