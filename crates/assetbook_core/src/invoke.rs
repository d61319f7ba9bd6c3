//! Named-operation dispatch boundary for the hosting runtime.
//!
//! # Responsibility
//! - Map an inbound function name plus positional string arguments onto one
//!   typed operation.
//! - Route operations to the repository and transfer coordinator.
//!
//! # Invariants
//! - Unknown function names are rejected at the boundary.
//! - Argument counts are validated exactly before any store access.
//! - Every invocation emits start and outcome events under one request id.

use crate::repo::entity_repo::{EntityRepository, RepoError};
use crate::service::bootstrap::seed_ledger;
use crate::service::transfer_service::{TransferError, TransferService};
use crate::store::KeyValueStore;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

/// One inbound request, decoded from its function name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Seed a fresh ledger with the fixed participants and assets.
    InitLedger,
    /// Return the raw value stored under `key`.
    Query { key: String },
    /// Create an asset owned by an existing participant.
    CreateAsset {
        id: String,
        value: i64,
        owner_id: String,
    },
    /// Create a participant with empty holdings.
    CreateParticipant {
        id: String,
        first_name: String,
        last_name: String,
    },
    /// Re-assign an asset between two participants.
    TransferAsset {
        transferer_id: String,
        transferee_id: String,
        asset_id: String,
    },
}

impl Operation {
    /// Decodes one operation from the host request.
    pub fn parse(name: &str, args: &[String]) -> Result<Self, InvokeError> {
        match name {
            "initLedger" => {
                expect_args("initLedger", args, 0)?;
                Ok(Self::InitLedger)
            }
            "query" => {
                expect_args("query", args, 1)?;
                Ok(Self::Query {
                    key: args[0].clone(),
                })
            }
            "createAsset" => {
                expect_args("createAsset", args, 3)?;
                let value = args[1].parse::<i64>().map_err(|_| InvokeError::InvalidArgument {
                    operation: "createAsset",
                    name: "value",
                    value: args[1].clone(),
                })?;
                Ok(Self::CreateAsset {
                    id: args[0].clone(),
                    value,
                    owner_id: args[2].clone(),
                })
            }
            "createParticipant" => {
                expect_args("createParticipant", args, 3)?;
                Ok(Self::CreateParticipant {
                    id: args[0].clone(),
                    first_name: args[1].clone(),
                    last_name: args[2].clone(),
                })
            }
            "transferAsset" => {
                expect_args("transferAsset", args, 3)?;
                Ok(Self::TransferAsset {
                    transferer_id: args[0].clone(),
                    transferee_id: args[1].clone(),
                    asset_id: args[2].clone(),
                })
            }
            other => Err(InvokeError::UnknownOperation(other.to_string())),
        }
    }

    /// Wire-level function name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitLedger => "initLedger",
            Self::Query { .. } => "query",
            Self::CreateAsset { .. } => "createAsset",
            Self::CreateParticipant { .. } => "createParticipant",
            Self::TransferAsset { .. } => "transferAsset",
        }
    }
}

/// Errors surfaced across the dispatch boundary.
#[derive(Debug)]
pub enum InvokeError {
    /// Function name matches no known operation.
    UnknownOperation(String),
    /// Operation invoked with the wrong number of arguments.
    ArgumentCountMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Positional argument failed conversion to its typed form.
    InvalidArgument {
        operation: &'static str,
        name: &'static str,
        value: String,
    },
    /// Repository-level failure.
    Repo(RepoError),
    /// Transfer-protocol failure.
    Transfer(TransferError),
}

impl InvokeError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownOperation(_) => "unknown_operation",
            Self::ArgumentCountMismatch { .. } => "argument_count_mismatch",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Repo(err) => repo_code(err),
            Self::Transfer(err) => transfer_code(err),
        }
    }
}

fn repo_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation_failed",
        RepoError::Store(_) => "store_failure",
        RepoError::DuplicateKey(_) => "duplicate_key",
        RepoError::UnknownOwner(_) => "unknown_owner",
        RepoError::NotFound(_) => "not_found",
        RepoError::InvalidData(_) => "invalid_data",
    }
}

fn transfer_code(err: &TransferError) -> &'static str {
    match err {
        TransferError::UnknownParticipant(_) => "unknown_participant",
        TransferError::UnknownAsset(_) => "unknown_asset",
        TransferError::NotOwner { .. } => "not_owner",
        TransferError::InconsistentState { .. } => "ledger_integrity",
        TransferError::Repo(inner) => repo_code(inner),
    }
}

impl Display for InvokeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOperation(name) => write!(f, "unknown operation: `{name}`"),
            Self::ArgumentCountMismatch {
                operation,
                expected,
                actual,
            } => write!(
                f,
                "{operation} expects {expected} argument(s), got {actual}"
            ),
            Self::InvalidArgument {
                operation,
                name,
                value,
            } => write!(f, "{operation} argument {name} is invalid: `{value}`"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InvokeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Transfer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for InvokeError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TransferError> for InvokeError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

/// Executes one decoded operation against the store.
///
/// Mutations complete with `None`; `query` returns the stored value.
pub fn execute<S: KeyValueStore>(
    store: &S,
    operation: &Operation,
) -> Result<Option<String>, InvokeError> {
    let request_id = Uuid::new_v4();
    let started_at = Instant::now();
    info!(
        "event=invoke module=invoke status=start request_id={request_id} operation={}",
        operation.name()
    );

    let result = run(store, operation);
    match &result {
        Ok(_) => info!(
            "event=invoke module=invoke status=ok request_id={request_id} operation={} duration_ms={}",
            operation.name(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=invoke module=invoke status=error request_id={request_id} operation={} duration_ms={} error_code={} error={err}",
            operation.name(),
            started_at.elapsed().as_millis(),
            err.code()
        ),
    }
    result
}

fn run<S: KeyValueStore>(store: &S, operation: &Operation) -> Result<Option<String>, InvokeError> {
    let repo = EntityRepository::new(store);
    match operation {
        Operation::InitLedger => {
            seed_ledger(&repo)?;
            Ok(None)
        }
        Operation::Query { key } => Ok(Some(repo.get_raw(key)?)),
        Operation::CreateAsset {
            id,
            value,
            owner_id,
        } => {
            repo.create_asset(id, *value, owner_id)?;
            Ok(None)
        }
        Operation::CreateParticipant {
            id,
            first_name,
            last_name,
        } => {
            repo.create_participant(id, first_name, last_name)?;
            Ok(None)
        }
        Operation::TransferAsset {
            transferer_id,
            transferee_id,
            asset_id,
        } => {
            TransferService::new(store).transfer(transferer_id, transferee_id, asset_id)?;
            Ok(None)
        }
    }
}

fn expect_args(operation: &'static str, args: &[String], expected: usize) -> Result<(), InvokeError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(InvokeError::ArgumentCountMismatch {
            operation,
            expected,
            actual: args.len(),
        })
    }
}
