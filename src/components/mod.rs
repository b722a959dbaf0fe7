//! # Declarative Components
//!
//! Building blocks for tickets. Instead of pushing command bytes by hand,
//! you describe the lines you want:
//!
//! ```
//! use ticketera::components::*;
//!
//! let receipt = Receipt::new()
//!     .child(Text::new("MICHASKA").center().bold().double_size())
//!     .child(Divider::equals())
//!     .child(LineItem::new("Tamal de elote", 2.0, 15.0, 30.0))
//!     .child(Total::new(30.0))
//!     .cut();
//!
//! // Compile to IR (inspectable)
//! let ir = receipt.compile();
//! println!("{:#?}", ir);
//!
//! // Generate bytes
//! let bytes = receipt.build();
//! ```
//!
//! ## Component Trait
//!
//! All components implement [`Component`], which emits IR ops.
//! [`Receipt`] holds children and emits them in order.

mod layout;
mod receipt;
mod text;

pub use layout::*;
pub use receipt::*;
pub use text::*;

use crate::ir::{CommandSequence, Op, Program};

/// Trait for declarative components.
///
/// Components emit IR ops when compiled.
pub trait Component {
    /// Emit IR ops for this component into the ops vector.
    fn emit(&self, ops: &mut Vec<Op>);
}

/// Extension trait for compiling components.
pub trait ComponentExt: Component {
    /// Compile this component to an IR program.
    ///
    /// The program starts with an Init op, followed by the component's ops.
    fn compile(&self) -> Program {
        let mut ops = vec![Op::Init];
        self.emit(&mut ops);
        Program { ops }
    }

    /// Compile and generate bytes.
    fn build(&self) -> CommandSequence {
        self.compile().to_bytes()
    }
}

// Blanket implementation for all components
impl<T: Component> ComponentExt for T {}

// Allow boxed components
impl Component for Box<dyn Component> {
    fn emit(&self, ops: &mut Vec<Op>) {
        self.as_ref().emit(ops);
    }
}

// Allow references to components
impl<T: Component + ?Sized> Component for &T {
    fn emit(&self, ops: &mut Vec<Op>) {
        (*self).emit(ops);
    }
}
