use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;

use tuikit::{
    Buffer, Form, FormButtons, FormEditBox, FormEditBoxConfig, FormField, FormRow, FormSelector,
    Key, KeyType, Modifiers, Rect, TuiConfig,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn load_config() -> TuiConfig {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[form]\nlabel_width = 8\nvertical_padding = 1").unwrap();
    TuiConfig::load(file.path()).unwrap()
}

fn type_text(form: &mut Form, text: &str) {
    for c in text.chars() {
        form.feed(&Key::normal(c));
    }
}

struct Recorded {
    name: Rc<RefCell<String>>,
    color: Rc<RefCell<Vec<usize>>>,
    saved: Rc<Cell<u32>>,
}

fn build_form(area: Rect) -> (Form, Recorded) {
    let recorded = Recorded {
        name: Rc::default(),
        color: Rc::default(),
        saved: Rc::default(),
    };
    let name = Rc::clone(&recorded.name);
    let color = Rc::clone(&recorded.color);
    let saved = Rc::clone(&recorded.saved);

    let fields = vec![
        FormField::labeled(
            "Name",
            FormEditBox::new("", FormEditBoxConfig::default())
                .allow_blur_if(|text| !text.trim().is_empty())
                .on_change(move |text| *name.borrow_mut() = text.to_string()),
        ),
        FormField::labeled(
            "Color",
            FormSelector::new(["red", "green", "blue"])
                .on_change(move |selection| *color.borrow_mut() = selection.to_vec()),
        ),
        FormField::full_width(
            FormRow::new(Vec::new()).push(
                FormButtons::new()
                    .button("Save", move || saved.set(saved.get() + 1))
                    .button("Cancel", || {}),
            ),
        ),
    ];
    let form = Form::new(area, fields, load_config().form);
    (form, recorded)
}

#[test]
fn test_filling_in_a_form_with_the_keyboard() {
    init_tracing();
    let (mut form, recorded) = build_form(Rect::new(0, 0, 40, 12));
    assert_eq!(form.focused(), 0);

    // an empty name may not be left
    form.feed(&Key::new(KeyType::Tab));
    assert_eq!(form.focused(), 0);

    type_text(&mut form, "Ada");
    assert_eq!(*recorded.name.borrow(), "Ada");
    form.feed(&Key::new(KeyType::Tab));
    assert_eq!(form.focused(), 1);

    form.feed(&Key::new(KeyType::Return));
    form.feed(&Key::new(KeyType::Down));
    form.feed(&Key::new(KeyType::Return));
    assert_eq!(*recorded.color.borrow(), [1]);

    form.feed(&Key::new(KeyType::Down).with_modifiers(Modifiers::CONTROL));
    assert_eq!(form.focused(), 2);
    form.feed(&Key::new(KeyType::Return));
    assert_eq!(recorded.saved.get(), 1);

    form.feed(&Key::new(KeyType::Tab).with_modifiers(Modifiers::SHIFT));
    assert_eq!(form.focused(), 1);

    let mut screen = Buffer::sized(40, 12);
    form.draw(&mut screen);
    assert!(screen.row_text(1).contains("Name"));
    assert!(screen.row_text(1).contains("Ada"));
    assert!(screen.row_text(3).contains("Color"));
    assert!(screen.row_text(3).contains("green"));
    assert!(screen.row_text(5).contains("Save"));
}

#[test]
fn test_edit_box_growth_moves_later_fields_down() {
    init_tracing();
    let (mut form, _recorded) = build_form(Rect::new(0, 0, 40, 12));
    let before = form.region(1).unwrap();
    assert_eq!(form.region(0).unwrap().height, 1);

    type_text(&mut form, &"word ".repeat(12));
    // nothing moves until pending changes are processed
    assert_eq!(form.region(1), Some(before));
    assert!(form.process_pending());
    let grown = form.region(0).unwrap().height;
    assert!(grown >= 2);
    assert_eq!(form.region(1).unwrap().y, before.y + grown - 1);
    assert!(!form.process_pending());
}

#[test]
fn test_small_frame_follows_focus() {
    init_tracing();
    let (mut form, _recorded) = build_form(Rect::new(0, 0, 40, 3));
    type_text(&mut form, "Ada");
    form.feed(&Key::new(KeyType::Tab));
    form.feed(&Key::new(KeyType::Tab));
    assert_eq!(form.focused(), 2);

    let field = form.region(2).unwrap();
    let top = form.scroll_view().frame_top();
    assert!(top <= field.y as usize);
    assert!(field.bottom() as usize <= top + 3);

    let mut screen = Buffer::sized(40, 3);
    form.draw(&mut screen);
    assert!((0..3).any(|y| screen.row_text(y).contains("Save")));
}
