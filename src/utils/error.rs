use thiserror::Error;

use crate::models::RatingKind;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{kind}: värdet {value} ligger utanför intervallet 0-3")]
    InvalidRange { kind: RatingKind, value: i32 },

    #[error("Obligatoriskt fält saknas: {0}")]
    MissingRequiredField(&'static str),

    #[error("Index {index} saknas i galleriet ({len} poster)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Export misslyckades: {0}")]
    ExportFailure(String),

    #[error("Okänt fält: {0}")]
    UnknownField(String),

    #[error("IO-fel: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn export_failure(msg: impl Into<String>) -> Self {
        Self::ExportFailure(msg.into())
    }

    pub fn unknown_field(msg: impl Into<String>) -> Self {
        Self::UnknownField(msg.into())
    }

    /// Meddelande som visas för användaren i statusraden
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRange { .. } => "Допустимы значения от 0 до 3".to_string(),
            Self::MissingRequiredField("name") => "Укажите кличку собаки".to_string(),
            Self::MissingRequiredField(field) => format!("Заполните поле: {}", field),
            Self::IndexOutOfRange { .. } => "Родословная не найдена в галерее".to_string(),
            Self::ExportFailure(_) => "Ошибка при экспорте".to_string(),
            Self::UnknownField(path) => format!("Неизвестное поле: {}", path),
            Self::Io(_) => "Ошибка чтения файла".to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::MissingRequiredField("name").user_message(),
            "Укажите кличку собаки"
        );
        assert_eq!(
            AppError::export_failure("boom").user_message(),
            "Ошибка при экспорте"
        );
        let err = AppError::InvalidRange {
            kind: RatingKind::Health,
            value: 7,
        };
        assert_eq!(err.to_string(), "health: värdet 7 ligger utanför intervallet 0-3");
    }
}
