//! Section keys and the content each one produces

use crate::domain::{SelectionKey, ViewMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Basics,
    Input,
    Lists,
    Advanced,
}

impl SelectionKey for Section {
    const ALL: &'static [Self] = &[
        Section::Basics,
        Section::Input,
        Section::Lists,
        Section::Advanced,
    ];

    fn key(self) -> &'static str {
        match self {
            Section::Basics => "basics",
            Section::Input => "input",
            Section::Lists => "lists",
            Section::Advanced => "advanced",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Section::Basics => "Basics",
            Section::Input => "Input",
            Section::Lists => "Lists",
            Section::Advanced => "Advanced",
        }
    }
}

impl ViewMap for Section {
    type Props = FundamentalsState;
    type View = SectionView;

    fn producer(self) -> fn(&FundamentalsState) -> SectionView {
        match self {
            Section::Basics => basics_view,
            Section::Input => input_view,
            Section::Lists => lists_view,
            Section::Advanced => advanced_view,
        }
    }
}

impl Section {
    /// Focusable controls, in focus order
    pub fn controls(self) -> &'static [Control] {
        match self {
            Section::Basics | Section::Lists => &[],
            Section::Input => &[
                Control::TextInput,
                Control::BasicButton,
                Control::CustomButton,
                Control::NotificationsSwitch,
            ],
            Section::Advanced => &[
                Control::Decrement,
                Control::Increment,
                Control::StartLoading,
                Control::OpenModal,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TextInput,
    BasicButton,
    CustomButton,
    NotificationsSwitch,
    Decrement,
    Increment,
    StartLoading,
    OpenModal,
}

/// Screen-local state read by the section producers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundamentalsState {
    pub text: String,
    pub counter: i64,
    pub notifications: bool,
    pub loading: bool,
    pub editing: bool,
    pub focused: Option<Control>,
    /// Terminal size in cells
    pub viewport: (u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: &'static str,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub elements: Vec<Element>,
}

impl Card {
    fn new(title: &'static str, elements: Vec<Element>) -> Self {
        Self { title, elements }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    Bold,
    Italic,
    Colored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Text(String),
    Styled(&'static str, TextStyle),
    Swatch {
        label: &'static str,
        color: &'static str,
    },
    Image {
        source: &'static str,
        caption: &'static str,
    },
    ListRow {
        title: &'static str,
        description: &'static str,
    },
    Heading(&'static str),
    Entry(&'static str),
    Field {
        placeholder: &'static str,
        value: String,
        focused: bool,
        editing: bool,
    },
    Button {
        label: &'static str,
        focused: bool,
        /// Disabled and showing an activity indicator
        busy: bool,
    },
    Toggle {
        label: &'static str,
        on: bool,
        focused: bool,
    },
}

const FLAT_ITEMS: [(&str, &str); 3] = [
    ("Item 1", "First item description"),
    ("Item 2", "Second item description"),
    ("Item 3", "Third item description"),
];

const SECTIONED_ITEMS: [(&str, [&str; 3]); 2] = [
    ("Fruits", ["Apple", "Banana", "Orange"]),
    ("Vegetables", ["Carrot", "Broccoli", "Spinach"]),
];

pub const REMOTE_LOGO: &str = "https://reactnative.dev/img/tiny_logo.png";

fn basics_view(_state: &FundamentalsState) -> SectionView {
    SectionView {
        title: "Basic Components",
        cards: vec![
            Card::new(
                "View Container",
                vec![
                    Element::Swatch {
                        label: "Red Box",
                        color: "#FF6B6B",
                    },
                    Element::Swatch {
                        label: "Teal Box",
                        color: "#4ECDC4",
                    },
                ],
            ),
            Card::new(
                "Text Styling",
                vec![
                    Element::Styled("Normal Text", TextStyle::Normal),
                    Element::Styled("Bold Text", TextStyle::Bold),
                    Element::Styled("Italic Text", TextStyle::Italic),
                    Element::Styled("Colored Text", TextStyle::Colored),
                ],
            ),
            Card::new(
                "Images",
                vec![Element::Image {
                    source: REMOTE_LOGO,
                    caption: "Remote Image",
                }],
            ),
        ],
    }
}

fn input_view(state: &FundamentalsState) -> SectionView {
    let focused = |control| state.focused == Some(control);
    SectionView {
        title: "Input Components",
        cards: vec![
            Card::new(
                "Text Input",
                vec![
                    Element::Field {
                        placeholder: "Enter text here...",
                        value: state.text.clone(),
                        focused: focused(Control::TextInput),
                        editing: state.editing,
                    },
                    Element::Text(format!("Input: {}", state.text)),
                ],
            ),
            Card::new(
                "Buttons & Touchables",
                vec![
                    Element::Button {
                        label: "Basic Button",
                        focused: focused(Control::BasicButton),
                        busy: false,
                    },
                    Element::Button {
                        label: "Custom Touchable",
                        focused: focused(Control::CustomButton),
                        busy: false,
                    },
                    Element::Text("Try pressing and holding the custom button (L)".to_string()),
                ],
            ),
            Card::new(
                "Switch Toggle",
                vec![
                    Element::Toggle {
                        label: "Enable notifications",
                        on: state.notifications,
                        focused: focused(Control::NotificationsSwitch),
                    },
                    Element::Text(format!(
                        "Switch is {}",
                        if state.notifications { "ON" } else { "OFF" }
                    )),
                ],
            ),
        ],
    }
}

fn lists_view(_state: &FundamentalsState) -> SectionView {
    let flat = FLAT_ITEMS
        .iter()
        .map(|(title, description)| Element::ListRow { title, description })
        .collect();

    let mut sectioned = Vec::new();
    for (heading, entries) in SECTIONED_ITEMS.iter() {
        sectioned.push(Element::Heading(heading));
        sectioned.extend(entries.iter().map(|entry| Element::Entry(entry)));
    }

    SectionView {
        title: "Lists & Data",
        cards: vec![
            Card::new("Flat List", flat),
            Card::new("Section List", sectioned),
        ],
    }
}

fn advanced_view(state: &FundamentalsState) -> SectionView {
    let focused = |control| state.focused == Some(control);
    let (width, height) = state.viewport;
    SectionView {
        title: "Advanced Features",
        cards: vec![
            Card::new(
                "State Management",
                vec![
                    Element::Text(format!("Counter: {}", state.counter)),
                    Element::Button {
                        label: "-",
                        focused: focused(Control::Decrement),
                        busy: false,
                    },
                    Element::Button {
                        label: "+",
                        focused: focused(Control::Increment),
                        busy: false,
                    },
                ],
            ),
            Card::new(
                "Loading Indicator",
                vec![Element::Button {
                    label: "Start Loading",
                    focused: focused(Control::StartLoading),
                    busy: state.loading,
                }],
            ),
            Card::new(
                "Modal",
                vec![Element::Button {
                    label: "Open Modal",
                    focused: focused(Control::OpenModal),
                    busy: false,
                }],
            ),
            Card::new(
                "Device Information",
                vec![
                    Element::Text(format!("Platform: {}", std::env::consts::OS)),
                    Element::Text(format!("Version: {}", env!("CARGO_PKG_VERSION"))),
                    Element::Text(format!("Screen Width: {width} cells")),
                    Element::Text(format!("Screen Height: {height} cells")),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_has_a_producer_with_its_title() {
        let state = FundamentalsState::default();
        let titles: Vec<&str> = Section::ALL
            .iter()
            .map(|section| (section.producer())(&state).title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Basic Components",
                "Input Components",
                "Lists & Data",
                "Advanced Features"
            ]
        );
    }

    #[test]
    fn test_input_view_echoes_text_and_switch() {
        let state = FundamentalsState {
            text: "hello".to_string(),
            notifications: true,
            ..Default::default()
        };
        let view = input_view(&state);
        let texts: Vec<&Element> = view.cards.iter().flat_map(|c| c.elements.iter()).collect();
        assert!(texts.contains(&&Element::Text("Input: hello".to_string())));
        assert!(texts.contains(&&Element::Text("Switch is ON".to_string())));
    }

    #[test]
    fn test_lists_view_has_both_sections() {
        let view = lists_view(&FundamentalsState::default());
        assert_eq!(view.cards[0].elements.len(), 3);
        assert_eq!(view.cards[1].elements.len(), 8);
        assert_eq!(view.cards[1].elements[0], Element::Heading("Fruits"));
    }
}
