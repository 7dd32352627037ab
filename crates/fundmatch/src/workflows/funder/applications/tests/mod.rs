mod common;
mod selection;
mod service;
