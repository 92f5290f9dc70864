//! Seam for clauses that reference another table's rows.
//!
//! The engine never inspects the referenced table. A resolver supplied by
//! the host turns each reference clause into an opaque expression fragment
//! plus warnings; the assembler splices those fragments into the chain under
//! the normal join rules.

use crate::model::{LogicalJoin, ResolvedReferenceClause};

/// A clause pointing at another table, before resolution.
#[derive(Debug, Clone)]
pub struct ReferenceClause {
    pub column: String,
    pub referenced_table: String,
    pub value: String,
    pub logical: LogicalJoin,
}

/// External collaborator that resolves reference clauses.
pub trait ReferenceClauseResolver {
    fn resolve(&self, clause: &ReferenceClause) -> ResolvedReferenceClause;
}

/// Resolve every reference clause in order.
pub fn resolve_all<R: ReferenceClauseResolver>(
    resolver: &R,
    clauses: &[ReferenceClause],
) -> Vec<ResolvedReferenceClause> {
    clauses.iter().map(|c| resolver.resolve(c)).collect()
}
