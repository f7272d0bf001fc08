mod checks;
mod common;
mod domain;
mod import;
