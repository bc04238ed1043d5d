/*!
Module providing different function tools and data structures.
*/

pub mod determinist_random_variable;
pub mod distributions;
pub mod geometry;
pub mod maths;
