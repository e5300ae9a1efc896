//! The colors of the command line output, kept in one place.
//!
//! - FERRUM_RED: names, arguments and message sources
//! - ERROR_RED: failures reported back to the user

use colored::Color;

pub(crate) const FERRUM_RED: Color = Color::TrueColor {
    r: 255,
    g: 87,
    b: 87,
};

pub(crate) const ERROR_RED: Color = Color::TrueColor {
    r: 200,
    g: 30,
    b: 30,
};
