use crate::{expression::ValueShape, Token};

/// Resource kind a token is emitted as on Android.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    Color,
    Dimension,
    Integer,
    String,
}
impl DestinationKind {
    pub fn for_token(token: &Token) -> Self {
        let declared = token.type_.as_deref();
        let category = token.attribute("category");
        if declared == Some("color") {
            DestinationKind::Color
        } else if matches!(declared, Some("dimension" | "size")) || category == Some("size") {
            DestinationKind::Dimension
        } else if declared == Some("time") || category == Some("time") {
            DestinationKind::Integer
        } else {
            DestinationKind::String
        }
    }

    /// Like [`DestinationKind::for_token`], but typed resources cannot hold a
    /// reference mixed with other text, so those fall back to `String`.
    pub fn for_value(token: &Token, shape: &ValueShape<'_>) -> Self {
        match (Self::for_token(token), shape) {
            (kind, ValueShape::Embedded(_)) if kind.is_typed() => DestinationKind::String,
            (kind, _) => kind,
        }
    }

    pub fn is_typed(self) -> bool {
        !matches!(self, DestinationKind::String)
    }

    pub fn android_tag(self) -> &'static str {
        match self {
            DestinationKind::Color => "color",
            DestinationKind::Dimension => "dimen",
            DestinationKind::Integer => "integer",
            DestinationKind::String => "string",
        }
    }
}
