//! Card number entry driven through an in-memory field.
//!
//! Run with: cargo run -p horizon-mask --example card_number
//!
//! Set `RUST_LOG=horizon_mask=trace` to see the editing decisions.

use horizon_mask::{KeyPress, MaskOptions, MaskedInput, MemoryField, PlatformQuirks, TextField};
use tracing_subscriber::EnvFilter;

fn show(label: &str, field: &MemoryField) {
    println!(
        "{label:<12} {:?} caret {}",
        field.value(),
        field.selection().start
    );
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = MaskOptions::new().mask("9999 9999 9999 9999");
    let mut input = MaskedInput::new(options, PlatformQuirks::default(), None, None);
    let mut field = MemoryField::new();

    input.value_changed.connect(|value| tracing::info!(%value, "value changed"));
    input
        .invalid_char
        .connect(|invalid| tracing::warn!(ch = %invalid.ch, pos = invalid.pos, "rejected"));

    input.mount(&mut field);
    input.focus(&mut field);
    input.run_deferred(Some(&mut field));
    show("focused", &field);

    for ch in "4111x1111".chars() {
        field.type_text(ch.encode_utf8(&mut [0; 4]));
        input.change(&mut field);
        input.run_deferred(Some(&mut field));
    }
    show("typed", &field);

    input.key_down(KeyPress::backspace(), &field);
    field.backspace();
    input.change(&mut field);
    input.run_deferred(Some(&mut field));
    show("backspace", &field);

    field.type_text("11111111111");
    input.change(&mut field);
    input.run_deferred(Some(&mut field));
    show("pasted", &field);

    input.blur(&mut field);
    show("blurred", &field);
}
