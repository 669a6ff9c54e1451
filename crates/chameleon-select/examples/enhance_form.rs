//! Enhancing a form's select end to end.
//!
//! Builds a small document with a styled text input and a fruit select,
//! runs the enhancer over it, then walks through a click-driven
//! selection and prints what the host page would observe.
//!
//! Run with: cargo run -p chameleon-select --example enhance_form

use chameleon_dom::{ComputedStyle, Document, EventKind, SelectOption, properties};
use chameleon_select::{Enhancer, Part};
use chameleon_style::{ComputedStyleProvider, variables};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut doc = Document::new();
    let form = doc.create_form();
    let input = doc.create_text_input();
    let select = doc.create_select(vec![
        SelectOption::new("", "Choose\u{2026}").disabled(),
        SelectOption::new("a", "Apple"),
        SelectOption::new("b", "Banana"),
    ]);
    doc.append_child(doc.root(), form).unwrap();
    doc.append_child(form, input).unwrap();
    doc.append_child(form, select).unwrap();

    doc.set_computed_style(
        input,
        ComputedStyle::new()
            .with(properties::COLOR, "rgb(51, 51, 51)")
            .with(properties::BORDER, "1px solid rgb(170, 170, 170)")
            .with(properties::BACKGROUND_COLOR, "rgb(250, 250, 250)")
            .with(properties::FONT_SIZE, "14px"),
    )
    .unwrap();
    doc.set_offset_width(select, 240.0).unwrap();

    // A host-page listener, wired before the enhancer runs.
    doc.add_event_listener(select, EventKind::Change, |event| {
        println!("host listener: change fired, value = {:?}", event.value);
    })
    .unwrap();

    let mut enhancer = Enhancer::new(ComputedStyleProvider::new());
    let enhanced = enhancer.install(&mut doc).unwrap();
    println!("enhanced {enhanced} select(s)");

    // Find the synthesized container sitting just before the select.
    let container = doc
        .children(form)
        .iter()
        .copied()
        .find(|&node| {
            matches!(
                enhancer.registry().widget_at(&doc, node),
                Some((_, Part::Container))
            )
        })
        .unwrap();

    println!(
        "trigger border: {}",
        doc.variable(container, variables::BORDER).unwrap_or("?")
    );
    println!(
        "trigger color:  {}",
        doc.variable(container, variables::CURRENT_COLOR).unwrap_or("?")
    );

    // Open the menu, then click the "Banana" row.
    enhancer
        .registry_mut()
        .handle_click(&mut doc, container)
        .unwrap();
    let (id, _) = enhancer.registry().widget_at(&doc, container).unwrap();
    let row = enhancer.registry().get(id).unwrap().rows()[2];
    enhancer.registry_mut().handle_click(&mut doc, row).unwrap();

    println!(
        "after selection, value = {:?}, trigger color: {}",
        doc.select_value(select).unwrap(),
        doc.variable(container, variables::CURRENT_COLOR).unwrap_or("?")
    );
}
