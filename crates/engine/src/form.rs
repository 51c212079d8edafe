//! Transaction form: validation, record building, persistence dispatch.
//!
//! The pipeline is validate-then-dispatch with exactly two outcomes per
//! invocation: a [`SubmitOutcome`], or a single reported [`EngineError`].
//! Validation runs in two sequential, short-circuiting stages:
//!
//! 1. presence/positivity — empty description, non-positive (or unparsable)
//!    amount, empty date text, or a category outside the fixed set, all
//!    reported as one coarse [`InvalidInput`];
//! 2. date shape — reached only when stage 1 passes, reported as the more
//!    specific [`InvalidDateFormat`].
//!
//! [`InvalidInput`]: EngineError::InvalidInput
//! [`InvalidDateFormat`]: EngineError::InvalidDateFormat
use crate::{
    Category, Currency, EngineError, IdSource, Money, RecordDate, RecordId, RecordKind,
    RecordStore, ResultEngine, TransactionRecord,
};

/// Parses locale-formatted amount text and requires a positive value.
///
/// This is the amount rule the form enforces: `R$ 1.234,56` normalizes to
/// 1234,56; zero, negative, and unparsable inputs are all [`InvalidAmount`].
///
/// [`InvalidAmount`]: EngineError::InvalidAmount
pub fn normalize_amount(raw: &str) -> ResultEngine<Money> {
    let amount = Money::parse_major(raw, Currency::Brl)?;
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "amount must be positive".to_string(),
        ));
    }
    Ok(amount)
}

/// Raw form field values, exactly as the user typed them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub kind: RecordKind,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
}

impl FormState {
    /// Prefills the form from an existing record (the edit path).
    #[must_use]
    pub fn from_record(record: &TransactionRecord) -> Self {
        Self {
            kind: record.kind,
            description: record.description.clone(),
            amount: record.amount.format(Currency::Brl),
            date: record.date.as_str().to_string(),
            category: record.category.name().to_string(),
        }
    }

    /// Builds a persistence-ready record from the current field values.
    ///
    /// The id comes from `existing` when editing, otherwise it is minted
    /// fresh from `ids`.
    pub fn build_record(
        &self,
        existing: Option<&TransactionRecord>,
        ids: &mut dyn IdSource,
    ) -> ResultEngine<TransactionRecord> {
        let description = self.description.trim();
        let amount = normalize_amount(&self.amount).ok();
        let category = Category::try_from(self.category.as_str()).ok();

        // Stage 1: presence and positivity, one coarse failure.
        let missing = description.is_empty() || self.date.trim().is_empty();
        let (amount, category) = match (amount, category) {
            (Some(amount), Some(category)) if !missing => (amount, category),
            _ => {
                return Err(EngineError::InvalidInput(
                    "fill in all required fields".to_string(),
                ));
            }
        };

        // Stage 2: the date must match the DD/MM/AAAA digit grouping.
        let date = RecordDate::parse(&self.date)?;

        let id = match existing {
            Some(record) => record.id.clone(),
            None => ids.mint(),
        };

        Ok(TransactionRecord {
            id,
            kind: self.kind,
            description: description.to_string(),
            amount,
            date,
            category,
        })
    }
}

/// Successful dispatch, carrying the persisted record's id.
///
/// Either variant means the caller should close the form and refresh its
/// list (the "changed" signal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(RecordId),
    Updated(RecordId),
}

impl SubmitOutcome {
    #[must_use]
    pub fn id(&self) -> &RecordId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// Dispatches a built record to the persistence collaborator.
///
/// `is_update` reflects whether the originating record carried an id. A
/// store failure surfaces as [`EngineError::Store`]; no local state has been
/// touched at that point, so the caller simply keeps the form open.
pub async fn submit(
    store: &dyn RecordStore,
    record: &TransactionRecord,
    is_update: bool,
) -> ResultEngine<SubmitOutcome> {
    if is_update {
        store.update(record).await?;
        Ok(SubmitOutcome::Updated(record.id.clone()))
    } else {
        store.create(record).await?;
        Ok(SubmitOutcome::Created(record.id.clone()))
    }
}

/// The whole pipeline: build the record, then dispatch it.
///
/// The store is never touched when validation fails.
pub async fn save(
    form: &FormState,
    existing: Option<&TransactionRecord>,
    ids: &mut dyn IdSource,
    store: &dyn RecordStore,
) -> ResultEngine<SubmitOutcome> {
    let record = form.build_record(existing, ids)?;
    submit(store, &record, existing.is_some()).await
}
