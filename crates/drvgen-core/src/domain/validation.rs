use crate::domain::{
    entities::{Artifact, Bindings, Mark, Template},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_bindings(bindings: &Bindings) -> Result<(), DomainError> {
        bindings.validate()
    }

    /// Static check over the fixed catalogue: every token is disjoint from
    /// every other, and each artifact's mark set is disjoint on its own.
    pub fn validate_catalogue() -> Result<(), DomainError> {
        Mark::verify_disjoint(&Mark::ALL)?;
        for artifact in Artifact::ALL {
            Mark::verify_disjoint(artifact.marks())?;
        }
        Ok(())
    }

    /// A rendered artifact must not carry any of its accepted tokens.
    pub fn validate_rendered(template: &Template, rendered: &str) -> Result<(), DomainError> {
        match template.unresolved_marks(rendered).first() {
            Some(mark) => Err(DomainError::UnresolvedMark {
                artifact: template.artifact().to_string(),
                token: mark.token(),
            }),
            None => Ok(()),
        }
    }
}
