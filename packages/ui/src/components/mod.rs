//! Small form and layout primitives shared by every screen.

mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::{Checkbox, Input, Label, Select, Textarea};

mod card;
pub use card::{Badge, Card, EmptyState, Spinner};

mod pagination;
pub use pagination::Pagination;
