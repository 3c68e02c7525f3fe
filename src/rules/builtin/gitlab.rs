//! Flag catalogue for GitLab project settings exports.
//!
//! Keys mirror the export format verbatim, including the historical
//! `comitter` spelling; correcting it here would stop matching real
//! documents.

use once_cell::sync::Lazy;

use crate::rules::model::{FlagCatalog, FlagRule};

static CATALOG: Lazy<FlagCatalog> = Lazy::new(|| {
    FlagCatalog::new(
        "gitlab",
        vec![
            FlagRule::new(
                "password",
                "Cleartext password",
                "Passwords kept in the clear expose credentials if the file ever leaks.",
                "Store passwords hashed or encrypted, never in plain text.",
            ),
            FlagRule::new(
                "secret",
                "Cleartext secret",
                "Secrets kept in the clear expose sensitive material if the file ever leaks.",
                "Encrypt secrets or move them into a secret manager.",
            ),
            FlagRule::new(
                "project_visibility",
                "Public project visibility",
                "A project set to public can expose sensitive information to anyone on the internet.",
                "Restrict visibility to private or internal according to the required confidentiality.",
            ),
            FlagRule::new(
                "project_pages_access_level",
                "Public project pages",
                "Publicly accessible project pages may expose information that should stay restricted.",
                "Limit page access to authenticated users or a restricted group.",
            ),
            FlagRule::new(
                "project_security_and_compliance_enabled",
                "Security and compliance disabled",
                "Disabling security and compliance leaves the project open to attacks and policy violations.",
                "Enable security and compliance so the project meets security policies and standards.",
            ),
            FlagRule::new(
                "project_approvals_before_merge",
                "No approval required before merge",
                "Without merge approvals, unreviewed changes can land and compromise quality and security.",
                "Require at least one approval so changes are reviewed by another developer.",
            ),
            FlagRule::new(
                "project_push_rules_unsigned_commits",
                "Unsigned commits allowed",
                "Unsigned commits cannot be verified and open the door to malicious code injection.",
                "Enable push rules that reject unsigned commits to guarantee code integrity.",
            ),
            FlagRule::new(
                "project_push_rules_comitter_check",
                "Committer check disabled",
                "Without the committer check, a user can push code under someone else's identity.",
                "Enable the committer check so commits come from authorized users only.",
            ),
            FlagRule::new(
                "project_protected_branches",
                "Unprotected branches",
                "Unprotected branches can be modified without restriction, letting unapproved changes reach the code.",
                "Protect the main branches so unauthorized modifications are rejected.",
            ),
            FlagRule::new(
                "project_access_tokens",
                "Unsecured access tokens",
                "Leaked access tokens expose sensitive information and grant unintended access.",
                "Secure access tokens and use them only where necessary.",
            ),
            FlagRule::new(
                "project_deploy_tokens",
                "Unsecured deploy tokens",
                "Unsecured deploy tokens can let an attacker run unauthorized deployments.",
                "Secure deploy tokens and restrict them to verified deployment processes.",
            ),
            FlagRule::new(
                "project_deploy_keys",
                "Unsecured deploy keys",
                "Unsecured deploy keys expose the project to unauthorized access during deployments.",
                "Secure deploy keys and use them only in production environments.",
            ),
            FlagRule::new(
                "project_file_pipeline",
                "File pipeline disabled",
                "Without file pipelines, tests and deployments are not automated and verified.",
                "Enable the file pipeline so tests and deployments run automatically.",
            ),
            FlagRule::new(
                "project_merged_pipeline",
                "Merge pipeline disabled",
                "Without merge pipelines, merged branches can carry errors or inconsistencies.",
                "Enable the merge pipeline so every change is tested before merging.",
            ),
            FlagRule::new(
                "project_file_codeowners",
                "CODEOWNERS not configured",
                "Without code owners, review responsibilities are unclear and reviews get harder.",
                "Configure a CODEOWNERS file to assign review responsibilities.",
            ),
            FlagRule::new(
                "project_shared_runners_enabled",
                "Shared runners enabled",
                "Shared runners serve several projects and can share sensitive resources between them.",
                "Disable shared runners and use project-specific runners.",
            ),
            FlagRule::new(
                "project_runners_shared",
                "Shared runners allowed",
                "Allowing shared runners risks another project using the same resources.",
                "Disable shared runners to harden the pipeline.",
            ),
            FlagRule::new(
                "project_runners_notshared",
                "Dedicated runners disabled",
                "Dedicated runners add infrastructure cost but improve isolation.",
                "Enable dedicated runners when isolation takes priority.",
            ),
        ],
    )
});

pub fn catalog() -> &'static FlagCatalog {
    &CATALOG
}
