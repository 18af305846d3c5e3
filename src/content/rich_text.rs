use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// 段落块允许的 `type` 取值，缺省时同样视为段落
const PARAGRAPH_KINDS: &[&str] = &["p", "paragraph"];

/// 富文本文档
///
/// 有序的 [`Block`] 序列，序列化为 JSON 数组。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Vec<Block>);

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }

    /// 只包含一个纯文本段落的文档
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self(vec![Block::paragraph(text)])
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    /// 第一个块中第一个子节点的文本，块类型不限
    pub fn first_text(&self) -> Option<&str> {
        self.0.first()?.first_text()
    }
}

/// 行内文本片段
///
/// 除 `text` 以外的键（如 `bold`、`italic`）原样保存在 `marks` 中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    #[serde(flatten)]
    pub marks: Map<String, Value>,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Map::new(),
        }
    }
}

/// 富文本块
///
/// - [`Block::Paragraph`]：`type` 缺省或为 `p`/`paragraph`，且 `children` 全部是带 `text` 的片段
/// - [`Block::Unknown`]：其余任何块，按原始 JSON 保留，序列化时原样输出
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph {
        kind: Option<String>,
        children: Vec<TextSpan>,
        extra: Map<String, Value>,
    },
    Unknown(Value),
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            kind: None,
            children: vec![TextSpan::plain(text)],
            extra: Map::new(),
        }
    }

    /// 块内的文本片段，未知块没有片段
    pub fn spans(&self) -> &[TextSpan] {
        match self {
            Block::Paragraph { children, .. } => children,
            Block::Unknown(_) => &[],
        }
    }

    /// 第一个子节点的 `text`
    ///
    /// 未知块从原始 JSON 的 `children[0].text` 读取，如标题块或含链接的段落。
    pub fn first_text(&self) -> Option<&str> {
        match self {
            Block::Paragraph { children, .. } => children.first().map(|span| span.text.as_str()),
            Block::Unknown(value) => value.get("children")?.get(0)?.get("text")?.as_str(),
        }
    }

    fn parse_paragraph(value: &Value) -> Option<Block> {
        let mut object = value.as_object()?.clone();

        let kind = match object.remove("type") {
            None => None,
            Some(Value::String(kind)) if PARAGRAPH_KINDS.contains(&kind.as_str()) => Some(kind),
            Some(_) => return None,
        };

        let children = object.remove("children")?;
        let children = serde_json::from_value::<Vec<TextSpan>>(children).ok()?;

        Some(Block::Paragraph {
            kind,
            children,
            extra: object,
        })
    }
}

impl From<Value> for Block {
    fn from(value: Value) -> Self {
        Self::parse_paragraph(&value).unwrap_or(Block::Unknown(value))
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Block::Paragraph {
                kind,
                children,
                extra,
            } => {
                let mut object = extra.clone();
                if let Some(kind) = kind {
                    object.insert("type".to_string(), Value::String(kind.clone()));
                }
                let children = serde_json::to_value(children).map_err(serde::ser::Error::custom)?;
                object.insert("children".to_string(), children);
                object.serialize(serializer)
            }
            Block::Unknown(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Block::from)
    }
}
