pub mod annotation;
pub mod builder;
pub mod classifier;
pub mod diagnostic;
pub mod edge;
pub mod fix;
pub mod graph;
pub mod node;
pub mod obligation;
pub mod policy;
pub mod ports;
pub mod semantic;
pub mod solver;
