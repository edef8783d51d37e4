//! Suggested prompt chips and the channels that select them.

/// A suggested prompt shown above the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chip {
    pub label: &'static str,
    pub text: &'static str,
}

const fn chip(label: &'static str, text: &'static str) -> Chip {
    Chip { label, text }
}

pub const DEFAULT_CHIPS: &[Chip] = &[
    chip("What’s climate change?", "what’s climate change?"),
    chip("How do I recycle right?", "how do i recycle properly?"),
    chip("Tips to reduce plastic", "how to reduce plastic waste?"),
    chip("Sustainable living ideas", "give me sustainable living tips"),
    chip("How to save water?", "how can i save water at home?"),
    chip("Carbon footprint help", "how do i reduce my carbon footprint?"),
];

const CLIMATE_CHIPS: &[Chip] = &[
    chip("Why is it getting hotter?", "why is it getting hotter lately?"),
    chip("Biggest climate causes?", "what causes climate change the most?"),
    chip("What can I do?", "what can i do to help climate change?"),
];

const POLLUTION_CHIPS: &[Chip] = &[
    chip("Air pollution tips", "how can i reduce air pollution?"),
    chip("Water pollution causes", "what causes water pollution?"),
    chip("Plastic pollution", "why is plastic pollution so bad?"),
];

const RECYCLING_CHIPS: &[Chip] = &[
    chip("Recycle correctly", "how do i recycle properly?"),
    chip("What goes in bin?", "what can be recycled?"),
    chip("Recycling mistakes", "common recycling mistakes?"),
];

const SUSTAINABLE_CHIPS: &[Chip] = &[
    chip("Easy eco habits", "easy sustainable habits for beginners?"),
    chip("Low-waste tips", "how to reduce waste at home?"),
    chip("Eco-friendly lifestyle", "how to live more eco-friendly?"),
];

const PLASTIC_CHIPS: &[Chip] = &[
    chip("Cut single-use plastic", "how do i reduce single use plastic?"),
    chip("Plastic alternatives", "what are good alternatives to plastic?"),
    chip("Microplastics", "what are microplastics?"),
];

const WATER_CHIPS: &[Chip] = &[
    chip("Save water at home", "how can i save water at home?"),
    chip("Short shower tips", "easy ways to use less water?"),
    chip("Why conserve water?", "why is water conservation important?"),
];

const ENERGY_CHIPS: &[Chip] = &[
    chip("Renewable energy basics", "what is renewable energy?"),
    chip("Solar vs wind", "solar vs wind energy?"),
    chip("Save electricity", "how to save electricity at home?"),
];

/// A channel in the sidebar. Each one carries a topic key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    General,
    Climate,
    Pollution,
    Recycling,
    Sustainable,
    Plastic,
    Water,
    Energy,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::General => "general",
            Channel::Climate => "climate",
            Channel::Pollution => "pollution",
            Channel::Recycling => "recycling",
            Channel::Sustainable => "sustainable",
            Channel::Plastic => "plastic",
            Channel::Water => "water",
            Channel::Energy => "energy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|channel| channel.as_str() == key)
    }

    pub fn all() -> Vec<Channel> {
        vec![
            Channel::General,
            Channel::Climate,
            Channel::Pollution,
            Channel::Recycling,
            Channel::Sustainable,
            Channel::Plastic,
            Channel::Water,
            Channel::Energy,
        ]
    }

    /// Name shown in the header and the sidebar (without the `#`).
    pub fn display_name(&self) -> &'static str {
        self.as_str()
    }

    pub fn chips(&self) -> &'static [Chip] {
        match self {
            Channel::General => DEFAULT_CHIPS,
            Channel::Climate => CLIMATE_CHIPS,
            Channel::Pollution => POLLUTION_CHIPS,
            Channel::Recycling => RECYCLING_CHIPS,
            Channel::Sustainable => SUSTAINABLE_CHIPS,
            Channel::Plastic => PLASTIC_CHIPS,
            Channel::Water => WATER_CHIPS,
            Channel::Energy => ENERGY_CHIPS,
        }
    }
}

/// Chip set for a topic key. Unknown keys get the default set.
pub fn chips_for_topic(topic: &str) -> &'static [Chip] {
    Channel::from_key(topic)
        .map(|channel| channel.chips())
        .unwrap_or(DEFAULT_CHIPS)
}
