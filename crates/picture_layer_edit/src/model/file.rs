use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::text_value::{self, flag, number, text};

/// Comparison applied between a game variable and [`PictureFile::variable_operand`].
///
/// Stored as `VariableType` `"0"`..`"5"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableOperator {
    #[default]
    Equal,
    GreaterOrEqual,
    LessOrEqual,
    Greater,
    Less,
    NotEqual,
}

impl VariableOperator {
    pub const ALL: [VariableOperator; 6] = [
        VariableOperator::Equal,
        VariableOperator::GreaterOrEqual,
        VariableOperator::LessOrEqual,
        VariableOperator::Greater,
        VariableOperator::Less,
        VariableOperator::NotEqual,
    ];

    pub fn code(self) -> i32 {
        match self {
            VariableOperator::Equal => 0,
            VariableOperator::GreaterOrEqual => 1,
            VariableOperator::LessOrEqual => 2,
            VariableOperator::Greater => 3,
            VariableOperator::Less => 4,
            VariableOperator::NotEqual => 5,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            VariableOperator::Equal => "=",
            VariableOperator::GreaterOrEqual => ">=",
            VariableOperator::LessOrEqual => "<=",
            VariableOperator::Greater => ">",
            VariableOperator::Less => "<",
            VariableOperator::NotEqual => "!=",
        }
    }

    /// Evaluates `value <op> operand`.
    pub fn compare(self, value: i32, operand: i32) -> bool {
        match self {
            VariableOperator::Equal => value == operand,
            VariableOperator::GreaterOrEqual => value >= operand,
            VariableOperator::LessOrEqual => value <= operand,
            VariableOperator::Greater => value > operand,
            VariableOperator::Less => value < operand,
            VariableOperator::NotEqual => value != operand,
        }
    }
}

impl fmt::Display for VariableOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for VariableOperator {
    type Err = ();

    /// Accepts the stored code (`"3"`) or the symbol (`">"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(op) = Self::ALL.into_iter().find(|op| op.symbol() == s) {
            return Ok(op);
        }
        if s == "==" {
            return Ok(VariableOperator::Equal);
        }
        text_value::parse_number_text(s).and_then(Self::from_code).ok_or(())
    }
}

impl Serialize for VariableOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for VariableOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let code = text_value::number_from_value(&value).map_err(de::Error::custom)?;
        Self::from_code(code).ok_or_else(|| de::Error::custom(format!("unknown VariableType {code}")))
    }
}

/// One image variant of a layer together with its display conditions.
///
/// Files have no identity of their own; they are addressed by their position
/// in the owning layer, and that order decides which file wins on the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PictureFile {
    /// Path below `img/pictures` without extension.
    #[serde(rename = "FileName", with = "text")]
    pub file_name: String,
    #[serde(rename = "HpUpperLimit", with = "number")]
    pub hp_upper_limit: i32,
    #[serde(rename = "HpLowerLimit", with = "number")]
    pub hp_lower_limit: i32,
    #[serde(rename = "Inputting", with = "flag")]
    pub inputting: bool,
    #[serde(rename = "InputCommand", with = "text")]
    pub input_command: String,
    #[serde(rename = "InputSkillType", with = "number")]
    pub input_skill_type: i32,
    #[serde(rename = "Action", with = "flag")]
    pub action: bool,
    #[serde(rename = "Motion", with = "text")]
    pub motion: String,
    #[serde(rename = "State", with = "number")]
    pub state: i32,
    #[serde(rename = "Weapon", with = "number")]
    pub weapon: i32,
    #[serde(rename = "Armor", with = "number")]
    pub armor: i32,
    #[serde(rename = "Scene", with = "text")]
    pub scene: String,
    #[serde(rename = "Note", with = "text")]
    pub note: String,
    #[serde(rename = "Message", with = "flag")]
    pub message: bool,
    #[serde(rename = "Face", with = "flag")]
    pub face: bool,
    #[serde(rename = "Speaker", with = "flag")]
    pub speaker: bool,
    #[serde(rename = "Switch", with = "number")]
    pub switch: i32,
    #[serde(rename = "Variable", with = "number")]
    pub variable: i32,
    #[serde(rename = "VariableType")]
    pub variable_type: VariableOperator,
    #[serde(rename = "VariableOperand", with = "number")]
    pub variable_operand: i32,
    #[serde(rename = "Script", with = "text")]
    pub script: String,

    /// Keys this model does not know about, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PictureFile {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            hp_upper_limit: 0,
            hp_lower_limit: 0,
            inputting: false,
            input_command: String::new(),
            input_skill_type: 1,
            action: false,
            motion: String::new(),
            state: 0,
            weapon: 0,
            armor: 0,
            scene: String::new(),
            note: String::new(),
            message: false,
            face: false,
            speaker: false,
            switch: 0,
            variable: 0,
            variable_type: VariableOperator::Equal,
            variable_operand: 0,
            script: String::new(),
            extra: Map::new(),
        }
    }
}

impl PictureFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// Sets `field` from its textual form. Returns false if the text is not
    /// a valid value for the field.
    pub fn set_field(&mut self, field: FileField, value: &str) -> bool {
        fn set_num(slot: &mut i32, value: &str) -> bool {
            text_value::parse_number_text(value).map(|v| *slot = v).is_some()
        }
        fn set_flag(slot: &mut bool, value: &str) -> bool {
            text_value::parse_flag_text(value).map(|v| *slot = v).is_some()
        }
        match field {
            FileField::FileName => self.file_name = value.to_string(),
            FileField::InputCommand => self.input_command = value.to_string(),
            FileField::Motion => self.motion = value.to_string(),
            FileField::Scene => self.scene = value.to_string(),
            FileField::Note => self.note = value.to_string(),
            FileField::Script => self.script = value.to_string(),
            FileField::HpUpperLimit => return set_num(&mut self.hp_upper_limit, value),
            FileField::HpLowerLimit => return set_num(&mut self.hp_lower_limit, value),
            FileField::InputSkillType => return set_num(&mut self.input_skill_type, value),
            FileField::State => return set_num(&mut self.state, value),
            FileField::Weapon => return set_num(&mut self.weapon, value),
            FileField::Armor => return set_num(&mut self.armor, value),
            FileField::Switch => return set_num(&mut self.switch, value),
            FileField::Variable => return set_num(&mut self.variable, value),
            FileField::VariableOperand => return set_num(&mut self.variable_operand, value),
            FileField::Inputting => return set_flag(&mut self.inputting, value),
            FileField::Action => return set_flag(&mut self.action, value),
            FileField::Message => return set_flag(&mut self.message, value),
            FileField::Face => return set_flag(&mut self.face, value),
            FileField::Speaker => return set_flag(&mut self.speaker, value),
            FileField::VariableType => match value.parse::<VariableOperator>() {
                Ok(op) => self.variable_type = op,
                Err(()) => return false,
            },
        }
        true
    }
}

/// Editable attributes of a [`PictureFile`], named by their host keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileField {
    FileName,
    HpUpperLimit,
    HpLowerLimit,
    Inputting,
    InputCommand,
    InputSkillType,
    Action,
    Motion,
    State,
    Weapon,
    Armor,
    Scene,
    Note,
    Message,
    Face,
    Speaker,
    Switch,
    Variable,
    VariableType,
    VariableOperand,
    Script,
}

impl FileField {
    pub const ALL: [FileField; 21] = [
        FileField::FileName,
        FileField::HpUpperLimit,
        FileField::HpLowerLimit,
        FileField::Inputting,
        FileField::InputCommand,
        FileField::InputSkillType,
        FileField::Action,
        FileField::Motion,
        FileField::State,
        FileField::Weapon,
        FileField::Armor,
        FileField::Scene,
        FileField::Note,
        FileField::Message,
        FileField::Face,
        FileField::Speaker,
        FileField::Switch,
        FileField::Variable,
        FileField::VariableType,
        FileField::VariableOperand,
        FileField::Script,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FileField::FileName => "FileName",
            FileField::HpUpperLimit => "HpUpperLimit",
            FileField::HpLowerLimit => "HpLowerLimit",
            FileField::Inputting => "Inputting",
            FileField::InputCommand => "InputCommand",
            FileField::InputSkillType => "InputSkillType",
            FileField::Action => "Action",
            FileField::Motion => "Motion",
            FileField::State => "State",
            FileField::Weapon => "Weapon",
            FileField::Armor => "Armor",
            FileField::Scene => "Scene",
            FileField::Note => "Note",
            FileField::Message => "Message",
            FileField::Face => "Face",
            FileField::Speaker => "Speaker",
            FileField::Switch => "Switch",
            FileField::Variable => "Variable",
            FileField::VariableType => "VariableType",
            FileField::VariableOperand => "VariableOperand",
            FileField::Script => "Script",
        }
    }
}

impl fmt::Display for FileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown file field '{s}'"))
    }
}
