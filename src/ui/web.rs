//! Browser front-end
//!
//! Renders the form into `#app` (created under `<body>` if missing) and
//! wires two delegated listeners on that element:
//! - `input`: updates the edited field and refreshes the summary lines in
//!   place, so the focused input is never rebuilt
//! - `click`: runs the button's `data-action` and re-renders everything

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement};

use crate::calculator::Calculator;
use crate::gradebook::SubjectField;
use crate::persistence::{LocalStorage, MemoryStorage, Storage};
use crate::settings::Settings;

use super::labels;
use super::view::SemesterView;

const INPUT_CLASS: &str = "border rounded-lg px-4 py-2";

/// Page state shared by the event handlers
struct App {
    calc: Calculator<Box<dyn Storage>>,
    document: Document,
    root: Element,
}

fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_attribute("class", class)?;
    Ok(el)
}

fn text_input(
    document: &Document,
    class: &str,
    placeholder: &str,
    value: &str,
) -> Result<HtmlInputElement, JsValue> {
    let input: HtmlInputElement = element(document, "input", class)?.dyn_into()?;
    input.set_type("text");
    input.set_placeholder(placeholder);
    input.set_value(value);
    Ok(input)
}

fn button(document: &Document, class: &str, label: &str, action: &str) -> Result<Element, JsValue> {
    let btn = element(document, "button", class)?;
    btn.set_attribute("type", "button")?;
    btn.set_attribute("data-action", action)?;
    btn.set_text_content(Some(label));
    Ok(btn)
}

impl App {
    /// Rebuild the whole page from the current state
    fn render(&self) -> Result<(), JsValue> {
        let view = self.calc.view();
        let d = &self.document;

        let page = element(d, "div", "min-h-screen bg-gray-100")?;
        let header = element(d, "header", "text-center py-4 text-2xl font-bold bg-white shadow")?;
        header.set_text_content(Some(labels::TITLE));
        page.append_child(&header)?;

        let outer = element(d, "div", "flex justify-center p-8")?;
        let card = element(d, "div", "bg-white p-8 rounded-xl shadow-xl w-full max-w-3xl")?;
        for semester in &view.semesters {
            card.append_child(&self.semester_block(semester)?)?;
        }

        card.append_child(&button(
            d,
            "w-full bg-green-500 text-white rounded-lg px-4 py-2 mb-2",
            labels::ADD_SEMESTER,
            "add-semester",
        )?)?;
        card.append_child(&button(
            d,
            "w-full bg-red-500 text-white rounded-lg px-4 py-2 flex justify-center items-center",
            labels::RESET_DATA,
            "reset",
        )?)?;

        let overall = element(d, "div", "mt-4 text-center font-medium text-gray-700")?;
        overall.set_attribute("data-summary", "overall")?;
        overall.set_text_content(Some(&view.summary));
        card.append_child(&overall)?;

        outer.append_child(&card)?;
        page.append_child(&outer)?;

        self.root.set_inner_html("");
        self.root.append_child(&page)?;
        Ok(())
    }

    fn semester_block(&self, semester: &SemesterView) -> Result<Element, JsValue> {
        let d = &self.document;
        let id = semester.id.to_string();
        let block = element(d, "div", "mb-6")?;

        let name = text_input(
            d,
            "border rounded-lg px-4 py-2 mb-2 w-full",
            labels::SEMESTER_NAME_PLACEHOLDER,
            &semester.name,
        )?;
        name.set_attribute("data-role", "semester-name")?;
        name.set_attribute("data-semester", &id)?;
        block.append_child(&name)?;

        for (index, subject) in semester.subjects.iter().enumerate() {
            let row = element(d, "div", "grid grid-cols-3 gap-4 mb-2")?;
            for field in SubjectField::ALL {
                let input = text_input(d, INPUT_CLASS, labels::placeholder(field), subject.get(field))?;
                input.set_attribute("data-role", "subject")?;
                input.set_attribute("data-semester", &id)?;
                input.set_attribute("data-index", &index.to_string())?;
                input.set_attribute("data-field", field.as_str())?;
                row.append_child(&input)?;
            }
            block.append_child(&row)?;
        }

        let add = button(
            d,
            "flex items-center bg-blue-500 text-white rounded-lg px-4 py-2 mb-2",
            labels::ADD_SUBJECT,
            "add-subject",
        )?;
        add.set_attribute("data-semester", &id)?;
        block.append_child(&add)?;

        let summary = element(d, "div", "text-sm text-gray-600")?;
        summary.set_attribute("data-summary", &id)?;
        summary.set_text_content(Some(&semester.summary));
        block.append_child(&summary)?;

        Ok(block)
    }

    /// Rewrite only the summary lines
    fn refresh_summaries(&self) {
        let view = self.calc.view();
        for semester in &view.semesters {
            let selector = format!("[data-summary=\"{}\"]", semester.id);
            if let Ok(Some(el)) = self.root.query_selector(&selector) {
                el.set_text_content(Some(&semester.summary));
            }
        }
        if let Ok(Some(el)) = self.root.query_selector("[data-summary=\"overall\"]") {
            el.set_text_content(Some(&view.summary));
        }
    }

    /// Apply a text edit coming from one of the rendered inputs
    fn apply_input(&mut self, input: &HtmlInputElement) {
        let semester = input
            .get_attribute("data-semester")
            .and_then(|s| s.parse::<u32>().ok());
        let Some(semester) = semester else {
            return;
        };
        let value = input.value();

        let result = match input.get_attribute("data-role").as_deref() {
            Some("semester-name") => self.calc.update_semester_name(semester, &value),
            Some("subject") => {
                let index = input
                    .get_attribute("data-index")
                    .and_then(|s| s.parse::<usize>().ok());
                let field = input
                    .get_attribute("data-field")
                    .and_then(|s| s.parse::<SubjectField>().ok());
                match (index, field) {
                    (Some(index), Some(field)) => {
                        self.calc.handle_input_change(semester, index, field, &value)
                    }
                    _ => return,
                }
            }
            _ => return,
        };

        if let Err(e) = result {
            log::error!("Failed to save grade data: {}", e);
        }
        self.refresh_summaries();
    }

    /// Run a button action
    fn apply_action(&mut self, action: &str, semester: Option<u32>) {
        let result = match (action, semester) {
            ("add-subject", Some(id)) => self.calc.add_subject(id).map(|_| ()),
            ("add-semester", _) => self.calc.add_semester().map(|_| ()),
            ("reset", _) => self.calc.reset_data(),
            _ => {
                log::warn!("Unknown action '{}'", action);
                return;
            }
        };
        if let Err(e) = result {
            log::error!("Failed to save grade data: {}", e);
        }
        if let Err(e) = self.render() {
            log::error!("Render failed: {:?}", e);
        }
    }
}

/// Start the calculator in the current page
pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("GPA calculator starting...");

    if let Err(e) = mount() {
        log::error!("Failed to start: {:?}", e);
    }
}

fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let mut storage: Box<dyn Storage> = match LocalStorage::open() {
        Ok(local) => Box::new(local),
        Err(e) => {
            log::warn!("{}; edits will be lost on reload", e);
            Box::new(MemoryStorage::new())
        }
    };
    let settings = Settings::load(storage.as_mut());
    log::set_max_level(settings.log_level.to_filter());

    let calc = Calculator::load(storage, &settings);

    if let Some(loading) = document.get_element_by_id("loading") {
        let _ = loading.set_attribute("class", "hidden");
    }

    let root = match document.get_element_by_id("app") {
        Some(el) => el,
        None => {
            let el = document.create_element("div")?;
            el.set_id("app");
            let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
            body.append_child(&el)?;
            el
        }
    };

    let app = Rc::new(RefCell::new(App {
        calc,
        document,
        root: root.clone(),
    }));
    app.borrow().render()?;

    setup_input_handler(&root, app.clone());
    setup_click_handler(&root, app);

    log::info!("GPA calculator running!");
    Ok(())
}

fn setup_input_handler(root: &Element, app: Rc<RefCell<App>>) {
    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
        let input = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok());
        if let Some(input) = input {
            app.borrow_mut().apply_input(&input);
        }
    });
    let _ = root.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn setup_click_handler(root: &Element, app: Rc<RefCell<App>>) {
    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
        let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
        let Some(target) = target else {
            return;
        };
        let Ok(Some(button)) = target.closest("[data-action]") else {
            return;
        };
        let action = button.get_attribute("data-action").unwrap_or_default();
        let semester = button
            .get_attribute("data-semester")
            .and_then(|s| s.parse::<u32>().ok());
        app.borrow_mut().apply_action(&action, semester);
    });
    let _ = root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
