//! Mutation submission
//!
//! The core only sizes and pre-checks mutations. Signing, broadcasting and
//! confirmation belong to a [MutationSink] outside the crate, and the ledger
//! re-checks every invariant on its side. Local state only moves once the
//! sink reports the mutation accepted.

use crate::{
    accounting::mint::{size_deposit, DepositQuote},
    base::{address::Address, amount::Amount},
    clock::TimeSource,
    config::ProgramIds,
    ledger::{snapshot::LedgerSnapshot, LedgerReader},
    oracle::{signature::SignatureScheme, OracleRequest, TimeOracle},
    vesting::{store::ClaimStore, Transfer},
};
use anyhow::Context;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// One state-changing call against the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "function")]
pub enum Mutation {
    DepositPublicAsSigner {
        deposit: u64,
        min_receipt_out: u64,

        /// Zero address when absent
        referrer: Option<String>,
    },
    UpdateTimestamp(OracleRequest),
    CreateClaim {
        claim_id: u64,
        amount: u128,
        recipient: Address,
    },
    WithdrawRewards {
        claim_id: u64,
        amount: u128,
    },
    WithdrawPrincipal {
        claim_id: u64,
        amount: u128,
    },
    Cancel {
        claim_id: u64,
        amount: u128,
    },
}

impl Mutation {
    /// Function the mutation calls on-chain
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::DepositPublicAsSigner { .. } => "deposit_public_as_signer",
            Self::UpdateTimestamp(_) => "update_timestamp",
            Self::CreateClaim { .. } => "create_claim",
            Self::WithdrawRewards { .. } => "withdraw_rewards",
            Self::WithdrawPrincipal { .. } => "withdraw_principal",
            Self::Cancel { .. } => "cancel",
        }
    }

    /// Program the mutation is addressed to
    pub fn program<'a>(&self, programs: &'a ProgramIds) -> &'a str {
        match self {
            Self::DepositPublicAsSigner { .. } => &programs.core_protocol,
            Self::UpdateTimestamp(_) => &programs.time_oracle,
            Self::CreateClaim { .. }
            | Self::WithdrawRewards { .. }
            | Self::WithdrawPrincipal { .. }
            | Self::Cancel { .. } => &programs.token_disbursement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Submission {
    Accepted,
    Rejected { reason: String },
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Ledger write access, implemented by a transaction client outside this
/// crate
pub trait MutationSink {
    /// Errors are transport failures, ledger rejections are a [Submission]
    fn submit(&mut self, mutation: Mutation) -> anyhow::Result<Submission>;
}

/// Sink that accepts everything and keeps what it was given
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub submitted: Vec<Mutation>,
}

impl MutationSink for RecordingSink {
    fn submit(&mut self, mutation: Mutation) -> anyhow::Result<Submission> {
        self.submitted.push(mutation);
        Ok(Submission::Accepted)
    }
}

fn submit_logged<S: MutationSink + ?Sized>(
    sink: &mut S,
    programs: &ProgramIds,
    mutation: Mutation,
) -> anyhow::Result<Submission> {
    let target = format!("{}/{}", mutation.program(programs), mutation.function_name());
    let submission = sink.submit(mutation)?;

    match &submission {
        Submission::Accepted => info!("{target} accepted"),
        Submission::Rejected { reason } => warn!("{target} rejected: {reason}"),
    }
    Ok(submission)
}

/// Quotes deposits against live ledger state and submits them
pub struct DepositPlanner<'a, R: ?Sized> {
    reader: &'a R,
    programs: &'a ProgramIds,
}

impl<'a, R: LedgerReader + ?Sized> DepositPlanner<'a, R> {
    pub fn new(reader: &'a R, programs: &'a ProgramIds) -> Self {
        Self { reader, programs }
    }

    pub fn quote(&self, deposit: u64) -> anyhow::Result<DepositQuote> {
        let snapshot = LedgerSnapshot::read(self.reader, self.programs)?;
        size_deposit(&snapshot, deposit)
            .with_context(|| format!("pricing deposit of {}", Amount(deposit)))
    }

    pub fn plan(&self, deposit: u64, referrer: Option<String>) -> anyhow::Result<Mutation> {
        let quote = self.quote(deposit)?;

        Ok(Mutation::DepositPublicAsSigner {
            deposit,
            min_receipt_out: quote.min_receipt_out(),
            referrer,
        })
    }

    pub fn submit<S: MutationSink + ?Sized>(
        &self,
        sink: &mut S,
        deposit: u64,
        referrer: Option<String>,
    ) -> anyhow::Result<Submission> {
        let mutation = self.plan(deposit, referrer)?;
        debug!("Submitting deposit of {}", Amount(deposit));
        submit_logged(sink, self.programs, mutation)
    }
}

/// Relays committee-signed timestamp updates
///
/// The request must pass [TimeOracle::verify] before it is sent, and the
/// local oracle commits it only after the ledger accepts.
pub struct TimestampSubmitter<'a, C> {
    oracle: &'a mut TimeOracle<C>,
    programs: &'a ProgramIds,
}

impl<'a, C: SignatureScheme> TimestampSubmitter<'a, C> {
    pub fn new(oracle: &'a mut TimeOracle<C>, programs: &'a ProgramIds) -> Self {
        Self { oracle, programs }
    }

    pub fn submit<S: MutationSink + ?Sized>(
        &mut self,
        sink: &mut S,
        request: OracleRequest,
    ) -> anyhow::Result<Submission> {
        self.oracle.verify(&request)?;

        let submission =
            submit_logged(sink, self.programs, Mutation::UpdateTimestamp(request.clone()))?;
        if submission.is_accepted() {
            self.oracle.update_timestamp(&request)?;
        }
        Ok(submission)
    }
}

/// Runs claim operations against a staged copy of the store, submits the
/// matching mutation, and keeps the staged copy only if the ledger accepts
pub struct ClaimSubmitter<'a> {
    store: &'a mut ClaimStore,
    programs: &'a ProgramIds,
}

impl<'a> ClaimSubmitter<'a> {
    pub fn new(store: &'a mut ClaimStore, programs: &'a ProgramIds) -> Self {
        Self { store, programs }
    }

    pub fn create<S: MutationSink + ?Sized>(
        &mut self,
        sink: &mut S,
        caller: &Address,
        claim_id: u64,
        amount: u128,
        recipient: Address,
        time: impl TimeSource,
    ) -> anyhow::Result<Submission> {
        let mutation = Mutation::CreateClaim {
            claim_id,
            amount,
            recipient: recipient.clone(),
        };
        self.apply(sink, mutation, |store| {
            store.create(caller, claim_id, amount, recipient, time)
        })
    }

    pub fn withdraw_rewards<S: MutationSink + ?Sized>(
        &mut self,
        sink: &mut S,
        caller: &Address,
        claim_id: u64,
        amount: u128,
        time: impl TimeSource,
    ) -> anyhow::Result<Submission> {
        let mutation = Mutation::WithdrawRewards { claim_id, amount };
        self.apply(sink, mutation, |store| {
            store.withdraw_rewards(caller, claim_id, amount, time)
        })
    }

    pub fn withdraw_principal<S: MutationSink + ?Sized>(
        &mut self,
        sink: &mut S,
        caller: &Address,
        claim_id: u64,
        amount: u128,
        time: impl TimeSource,
    ) -> anyhow::Result<Submission> {
        let mutation = Mutation::WithdrawPrincipal { claim_id, amount };
        self.apply(sink, mutation, |store| {
            store.withdraw_principal(caller, claim_id, amount, time)
        })
    }

    pub fn cancel<S: MutationSink + ?Sized>(
        &mut self,
        sink: &mut S,
        caller: &Address,
        claim_id: u64,
        amount: u128,
        time: impl TimeSource,
    ) -> anyhow::Result<Submission> {
        let mutation = Mutation::Cancel { claim_id, amount };
        self.apply(sink, mutation, |store| store.cancel(caller, claim_id, amount, time))
    }

    fn apply<S, F>(&mut self, sink: &mut S, mutation: Mutation, op: F) -> anyhow::Result<Submission>
    where
        S: MutationSink + ?Sized,
        F: FnOnce(&mut ClaimStore) -> crate::vesting::store::Result<Transfer>,
    {
        let mut staged = self.store.clone();
        let transfer = op(&mut staged)?;
        let submission = submit_logged(sink, self.programs, mutation)?;

        if submission.is_accepted() {
            debug!("Settled {transfer:?}");
            *self.store = staged;
        }
        Ok(submission)
    }
}
