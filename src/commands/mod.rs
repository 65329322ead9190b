mod compare;
mod info;
mod run;

pub use compare::compare;
pub use info::info;
pub use run::run;
