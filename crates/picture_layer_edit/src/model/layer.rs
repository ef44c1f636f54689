use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::text_value::{self, flag, number, text, HostNumber};
use super::{LayerId, PictureFile};

/// One picture layer of a character: a name, an owning actor, placement and
/// the switches that control it, plus the ordered image variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PictureLayer {
    #[serde(skip)]
    id: LayerId,

    #[serde(rename = "ActorId", with = "number")]
    pub actor_id: i32,
    #[serde(rename = "Name", with = "text")]
    pub name: String,
    /// Position, scale and opacity keep their host text, see [`HostNumber`].
    #[serde(rename = "Opacity")]
    pub opacity: HostNumber,
    #[serde(rename = "X")]
    pub x: HostNumber,
    #[serde(rename = "Y")]
    pub y: HostNumber,
    #[serde(rename = "ScaleX")]
    pub scale_x: HostNumber,
    #[serde(rename = "ScaleY")]
    pub scale_y: HostNumber,
    /// Exempt from screen shake.
    #[serde(rename = "OutOfShake", with = "flag")]
    pub out_of_shake: bool,
    #[serde(rename = "FileList", with = "file_list")]
    pub file_list: Vec<PictureFile>,
    #[serde(rename = "ShowPictureSwitch", with = "number")]
    pub show_picture_switch: i32,
    #[serde(rename = "UnFocusSwitch", with = "number")]
    pub unfocus_switch: i32,
    #[serde(rename = "MirrorSwitch", with = "number")]
    pub mirror_switch: i32,
    #[serde(rename = "TouchSwitch", with = "number")]
    pub touch_switch: i32,

    /// Keys this model does not know about, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PictureLayer {
    fn default() -> Self {
        Self {
            id: LayerId::next(),
            actor_id: 1,
            name: "New Layer".to_string(),
            opacity: HostNumber::from(255),
            x: HostNumber::from(0),
            y: HostNumber::from(0),
            scale_x: HostNumber::from(100),
            scale_y: HostNumber::from(100),
            out_of_shake: false,
            file_list: Vec::new(),
            show_picture_switch: 0,
            unfocus_switch: 0,
            mirror_switch: 0,
            touch_switch: 0,
            extra: Map::new(),
        }
    }
}

/// Identity is not part of a layer's content: two layers are equal when
/// everything that ends up in the exchange format is equal.
impl PartialEq for PictureLayer {
    fn eq(&self, other: &Self) -> bool {
        self.actor_id == other.actor_id
            && self.name == other.name
            && self.opacity == other.opacity
            && self.x == other.x
            && self.y == other.y
            && self.scale_x == other.scale_x
            && self.scale_y == other.scale_y
            && self.out_of_shake == other.out_of_shake
            && self.file_list == other.file_list
            && self.show_picture_switch == other.show_picture_switch
            && self.unfocus_switch == other.unfocus_switch
            && self.mirror_switch == other.mirror_switch
            && self.touch_switch == other.touch_switch
            && self.extra == other.extra
    }
}

impl PictureLayer {
    /// A default layer owned by `actor_id`.
    pub fn new(actor_id: i32) -> Self {
        Self {
            actor_id,
            ..Default::default()
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Deep copy carrying a new identity.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = LayerId::next();
        copy
    }

    /// Copy of this layer's attributes with a new identity and no files.
    pub fn duplicate_attributes(&self) -> Self {
        Self {
            id: LayerId::next(),
            actor_id: self.actor_id,
            name: self.name.clone(),
            opacity: self.opacity.clone(),
            x: self.x.clone(),
            y: self.y.clone(),
            scale_x: self.scale_x.clone(),
            scale_y: self.scale_y.clone(),
            out_of_shake: self.out_of_shake,
            file_list: Vec::new(),
            show_picture_switch: self.show_picture_switch,
            unfocus_switch: self.unfocus_switch,
            mirror_switch: self.mirror_switch,
            touch_switch: self.touch_switch,
            extra: self.extra.clone(),
        }
    }

    /// Variable id shown for the whole layer: the one of its first file, 0 if
    /// the layer has no files. Files may disagree; only the first is read.
    pub fn variable_id(&self) -> i32 {
        self.file_list.first().map_or(0, |file| file.variable)
    }

    pub fn field_value(&self, field: LayerField) -> String {
        match field {
            LayerField::Name => self.name.clone(),
            LayerField::ActorId => self.actor_id.to_string(),
            LayerField::Opacity => self.opacity.to_string(),
            LayerField::X => self.x.to_string(),
            LayerField::Y => self.y.to_string(),
            LayerField::ScaleX => self.scale_x.to_string(),
            LayerField::ScaleY => self.scale_y.to_string(),
            LayerField::OutOfShake => self.out_of_shake.to_string(),
            LayerField::ShowPictureSwitch => self.show_picture_switch.to_string(),
            LayerField::UnFocusSwitch => self.unfocus_switch.to_string(),
            LayerField::MirrorSwitch => self.mirror_switch.to_string(),
            LayerField::TouchSwitch => self.touch_switch.to_string(),
        }
    }

    /// Sets `field` from its textual form. Returns false if the text is not
    /// a valid value for the field.
    pub fn set_field(&mut self, field: LayerField, value: &str) -> bool {
        let slot = match field {
            LayerField::Name => {
                self.name = value.to_string();
                return true;
            }
            LayerField::OutOfShake => return text_value::parse_flag_text(value).map(|flag| self.out_of_shake = flag).is_some(),
            LayerField::Opacity => return set_host_number(&mut self.opacity, value),
            LayerField::X => return set_host_number(&mut self.x, value),
            LayerField::Y => return set_host_number(&mut self.y, value),
            LayerField::ScaleX => return set_host_number(&mut self.scale_x, value),
            LayerField::ScaleY => return set_host_number(&mut self.scale_y, value),
            LayerField::ActorId => &mut self.actor_id,
            LayerField::ShowPictureSwitch => &mut self.show_picture_switch,
            LayerField::UnFocusSwitch => &mut self.unfocus_switch,
            LayerField::MirrorSwitch => &mut self.mirror_switch,
            LayerField::TouchSwitch => &mut self.touch_switch,
        };
        text_value::parse_number_text(value).map(|number| *slot = number).is_some()
    }
}

fn set_host_number(slot: &mut HostNumber, value: &str) -> bool {
    HostNumber::parse(value).map(|number| *slot = number).is_some()
}

/// Editable attributes of a [`PictureLayer`], named by their host keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerField {
    Name,
    ActorId,
    Opacity,
    X,
    Y,
    ScaleX,
    ScaleY,
    OutOfShake,
    ShowPictureSwitch,
    UnFocusSwitch,
    MirrorSwitch,
    TouchSwitch,
}

impl LayerField {
    pub const ALL: [LayerField; 12] = [
        LayerField::Name,
        LayerField::ActorId,
        LayerField::Opacity,
        LayerField::X,
        LayerField::Y,
        LayerField::ScaleX,
        LayerField::ScaleY,
        LayerField::OutOfShake,
        LayerField::ShowPictureSwitch,
        LayerField::UnFocusSwitch,
        LayerField::MirrorSwitch,
        LayerField::TouchSwitch,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LayerField::Name => "Name",
            LayerField::ActorId => "ActorId",
            LayerField::Opacity => "Opacity",
            LayerField::X => "X",
            LayerField::Y => "Y",
            LayerField::ScaleX => "ScaleX",
            LayerField::ScaleY => "ScaleY",
            LayerField::OutOfShake => "OutOfShake",
            LayerField::ShowPictureSwitch => "ShowPictureSwitch",
            LayerField::UnFocusSwitch => "UnFocusSwitch",
            LayerField::MirrorSwitch => "MirrorSwitch",
            LayerField::TouchSwitch => "TouchSwitch",
        }
    }
}

impl fmt::Display for LayerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LayerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown layer field '{s}'"))
    }
}

/// `FileList` is itself a JSON string holding an array of JSON strings.
pub(crate) mod file_list {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use crate::PictureFile;

    pub fn serialize<S: Serializer>(files: &[PictureFile], serializer: S) -> Result<S::Ok, S::Error> {
        let mut encoded = Vec::with_capacity(files.len());
        for file in files {
            encoded.push(serde_json::to_string(file).map_err(ser::Error::custom)?);
        }
        let text = serde_json::to_string(&encoded).map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<PictureFile>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode(value).map_err(de::Error::custom)
    }

    /// A string is parsed once more; anything that does not end up as an
    /// array counts as "no files". Malformed JSON is an error.
    fn decode(value: Value) -> Result<Vec<PictureFile>, String> {
        let entries = match value {
            Value::String(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Array(entries)) => entries,
                Ok(_) => return Ok(Vec::new()),
                Err(err) => return Err(format!("FileList: {err}")),
            },
            Value::Array(entries) => entries,
            _ => return Ok(Vec::new()),
        };

        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Value::String(text) => serde_json::from_str::<PictureFile>(&text).map_err(|err| format!("FileList entry {index}: {err}")),
                Value::Object(_) => serde_json::from_value::<PictureFile>(entry).map_err(|err| format!("FileList entry {index}: {err}")),
                other => Err(format!("FileList entry {index} is not a file: {other}")),
            })
            .collect()
    }
}
