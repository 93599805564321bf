use jst_overlay::OverlayError;
use jst_primitives::IdError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
	#[error("invalid popup id: {0}")]
	InvalidId(#[from] IdError),

	#[error(transparent)]
	Overlay(#[from] OverlayError),
}

pub type Result<T> = std::result::Result<T, WidgetError>;
