pub mod button;
pub mod panel;
pub mod text_box;

pub use button::Button;
pub use panel::Panel;
pub use text_box::TextBox;
