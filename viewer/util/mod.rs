pub mod html;
pub mod url;
