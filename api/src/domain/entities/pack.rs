//! Compliance pack aggregate
//!
//! A pack bundles one risk determination with its six generated documents,
//! an approval status, and an append-only audit trail. Once approved or
//! rejected the pack is immutable except for that trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::determination::AssessmentId;
use super::producer::ProducerId;

/// Unique, human-and-machine-readable pack identifier.
///
/// Format: `EUDR-<zero-padded unix millis>-<4 hex>`. The stable prefix plus
/// time-ordered suffix keeps packs in natural chronological sort order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackId(pub String);

impl PackId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let entropy: u16 = rand::random();
        Self(format!("EUDR-{:013}-{:04x}", millis, entropy))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pack lifecycle status
///
/// `Candidate` is a virtual state: an eligible producer without a persisted
/// pack. Persisted packs enter at `PendingApproval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackStatus {
    Candidate,
    PendingApproval,
    Approved,
    Rejected,
    Published,
}

impl PackStatus {
    /// Whether a reviewer decision is accepted from this state
    pub fn awaiting_decision(&self) -> bool {
        matches!(self, PackStatus::PendingApproval)
    }

    /// Whether a decision has already been recorded
    pub fn is_decided(&self) -> bool {
        matches!(
            self,
            PackStatus::Approved | PackStatus::Rejected | PackStatus::Published
        )
    }

    /// Whether documents are externally retrievable in this state
    pub fn is_retrievable(&self) -> bool {
        matches!(self, PackStatus::Approved | PackStatus::Published)
    }

    /// The legal transitions of the approval state machine
    pub fn can_transition_to(&self, next: PackStatus) -> bool {
        matches!(
            (self, next),
            (PackStatus::PendingApproval, PackStatus::Approved)
                | (PackStatus::PendingApproval, PackStatus::Rejected)
                | (PackStatus::Approved, PackStatus::Published)
        )
    }
}

impl std::fmt::Display for PackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackStatus::Candidate => write!(f, "candidate"),
            PackStatus::PendingApproval => write!(f, "pending_approval"),
            PackStatus::Approved => write!(f, "approved"),
            PackStatus::Rejected => write!(f, "rejected"),
            PackStatus::Published => write!(f, "published"),
        }
    }
}

impl std::str::FromStr for PackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candidate" => Ok(PackStatus::Candidate),
            "pending_approval" => Ok(PackStatus::PendingApproval),
            "approved" => Ok(PackStatus::Approved),
            "rejected" => Ok(PackStatus::Rejected),
            "published" => Ok(PackStatus::Published),
            _ => Err(format!("Unknown pack status: {}", s)),
        }
    }
}

/// Reviewer action on a pending pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    Approve,
    Reject,
}

impl DecisionAction {
    pub fn resulting_status(&self) -> PackStatus {
        match self {
            DecisionAction::Approve => PackStatus::Approved,
            DecisionAction::Reject => PackStatus::Rejected,
        }
    }
}

impl std::fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionAction::Approve => write!(f, "approve"),
            DecisionAction::Reject => write!(f, "reject"),
        }
    }
}

/// What an audit entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditDecision {
    Generated,
    Approved,
    Rejected,
    Published,
    Deleted,
}

impl std::fmt::Display for AuditDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditDecision::Generated => write!(f, "generated"),
            AuditDecision::Approved => write!(f, "approved"),
            AuditDecision::Rejected => write!(f, "rejected"),
            AuditDecision::Published => write!(f, "published"),
            AuditDecision::Deleted => write!(f, "deleted"),
        }
    }
}

impl std::str::FromStr for AuditDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generated" => Ok(AuditDecision::Generated),
            "approved" => Ok(AuditDecision::Approved),
            "rejected" => Ok(AuditDecision::Rejected),
            "published" => Ok(AuditDecision::Published),
            "deleted" => Ok(AuditDecision::Deleted),
            _ => Err(format!("Unknown audit decision: {}", s)),
        }
    }
}

/// One line of a pack's append-only audit trail
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub actor: String,
    pub decision: AuditDecision,
    pub notes: Option<String>,
    pub at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn now(actor: impl Into<String>, decision: AuditDecision, notes: Option<String>) -> Self {
        Self {
            actor: actor.into(),
            decision,
            notes,
            at: Utc::now(),
        }
    }
}

/// Exporter and shipment metadata supplied at pack generation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterMetadata {
    pub exporter_id: String,
    pub exporter_name: String,
    pub exporter_registration: String,
    pub shipment_id: String,
    pub destination: String,
    pub commodity: String,
    pub hs_code: String,
    pub total_weight: String,
    pub harvest_period: String,
}

/// The compliance pack aggregate root
#[derive(Debug, Clone, Serialize)]
pub struct CompliancePack {
    pub pack_id: PackId,
    pub producer_id: ProducerId,
    pub assessment_id: AssessmentId,
    pub exporter: ExporterMetadata,
    pub status: PackStatus,
    pub storage_expiry_date: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub audit_trail: Vec<AuditEntry>,
}

/// Data needed to persist a newly assembled pack
#[derive(Debug, Clone)]
pub struct NewCompliancePack {
    pub pack_id: PackId,
    pub producer_id: ProducerId,
    pub assessment_id: AssessmentId,
    pub exporter: ExporterMetadata,
    pub status: PackStatus,
    pub storage_expiry_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_pack_ids_sort_chronologically() {
        let a = PackId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = PackId::generate();
        assert!(a.as_str() < b.as_str());
    }

    #[test]
    fn generated_pack_ids_carry_the_stable_prefix() {
        assert!(PackId::generate().as_str().starts_with("EUDR-"));
    }

    #[test]
    fn pending_is_the_only_decidable_state() {
        assert!(PackStatus::PendingApproval.awaiting_decision());
        for status in [
            PackStatus::Candidate,
            PackStatus::Approved,
            PackStatus::Rejected,
            PackStatus::Published,
        ] {
            assert!(!status.awaiting_decision());
        }
    }

    #[test]
    fn transition_table_is_exhaustive() {
        use PackStatus::*;

        let all = [Candidate, PendingApproval, Approved, Rejected, Published];
        for from in all {
            for to in all {
                let legal = matches!(
                    (from, to),
                    (PendingApproval, Approved)
                        | (PendingApproval, Rejected)
                        | (Approved, Published)
                );
                assert_eq!(from.can_transition_to(to), legal, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn retrievable_states() {
        assert!(PackStatus::Approved.is_retrievable());
        assert!(PackStatus::Published.is_retrievable());
        assert!(!PackStatus::PendingApproval.is_retrievable());
        assert!(!PackStatus::Rejected.is_retrievable());
        assert!(!PackStatus::Candidate.is_retrievable());
    }

    #[test]
    fn status_round_trip() {
        for status in [
            PackStatus::Candidate,
            PackStatus::PendingApproval,
            PackStatus::Approved,
            PackStatus::Rejected,
            PackStatus::Published,
        ] {
            assert_eq!(status.to_string().parse::<PackStatus>().unwrap(), status);
        }
        assert!("shipped".parse::<PackStatus>().is_err());
    }

    #[test]
    fn decision_actions_map_to_terminal_states() {
        assert_eq!(
            DecisionAction::Approve.resulting_status(),
            PackStatus::Approved
        );
        assert_eq!(
            DecisionAction::Reject.resulting_status(),
            PackStatus::Rejected
        );
    }
}
