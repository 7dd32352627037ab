pub mod funder;
