//! Update resolution for mutable SIP resources.
//!
//! A single `update` command can perform two different mutations: a full
//! replace sourced from a JSON payload, or a sparse patch built from flags.
//! This module decides which one an invocation means and produces exactly one
//! well-formed request, shared across every updatable resource kind.
//!
//! The rules, in order:
//!
//! 1. More than one positional argument is rejected outright.
//! 2. Exactly one positional argument selects replace mode. The payload is
//!    read as a full resource description; an explicit `--id` flag wins over
//!    the identifier embedded in the payload, and the embedded identifier is
//!    cleared so it never travels inside the outgoing body.
//! 3. No positional argument selects patch mode, which requires `--id`.
//!    Field flags map to the patch individually: an omitted flag leaves the
//!    field untouched, and list flags support an explicit-clear sentinel
//!    (a single empty-string element).

use serde::{Deserialize, Serialize};

use crate::error::{Result, SipError};
use crate::payload;

/// The mutation mode selected for an update, with its payload.
///
/// Serializes as an externally tagged envelope, `{"replace": {...}}` or
/// `{"update": {...}}`, which is what the control plane's update endpoints
/// expect as the request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateAction<R, P> {
    /// Substitute the entire resource record.
    Replace(R),
    /// Change only the fields present in the patch.
    Update(P),
}

/// A resolved mutation: the target identifier plus the chosen action.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest<R, P> {
    /// Identifier of the resource to mutate. Non-empty after resolution.
    pub id: String,
    /// The mutation to apply.
    pub action: UpdateAction<R, P>,
}

/// Full resource descriptions usable as replace payloads.
///
/// The embedded identifier is only a fallback source for the target ID; it
/// must not be duplicated in the outgoing payload, so resolution takes it
/// out of the object.
pub trait ReplacePayload: serde::de::DeserializeOwned {
    /// Remove and return the identifier embedded in the payload.
    fn take_id(&mut self) -> String;
}

/// Resolve an update invocation into a single mutation request.
///
/// `positional` holds the trailing arguments (a JSON file path or literal
/// when replace mode is intended); `build_patch` constructs the sparse patch
/// from flags and is only invoked in patch mode, so per-field normalization
/// errors surface only there.
///
/// # Errors
///
/// All failures are local validation errors; no request is sent.
pub fn resolve_update<R, P, F>(
    id_flag: Option<&str>,
    positional: &[String],
    build_patch: F,
) -> Result<UpdateRequest<R, P>>
where
    R: ReplacePayload,
    F: FnOnce() -> Result<P>,
{
    if positional.len() > 1 {
        return Err(SipError::InvalidInput(
            "expected one JSON file or flags".to_string(),
        ));
    }

    let mut id = id_flag.unwrap_or_default().to_string();

    if let Some(arg) = positional.first() {
        let mut replacement: R = payload::read_json_arg(arg)?;
        let embedded = replacement.take_id();
        if id.is_empty() {
            id = embedded;
        }
        if id.is_empty() {
            return Err(SipError::InvalidInput(
                "no ID specified, use flag or set it in JSON".to_string(),
            ));
        }
        return Ok(UpdateRequest {
            id,
            action: UpdateAction::Replace(replacement),
        });
    }

    if id.is_empty() {
        return Err(SipError::InvalidInput("no ID specified".to_string()));
    }

    let patch = build_patch()?;
    Ok(UpdateRequest {
        id,
        action: UpdateAction::Update(patch),
    })
}

/// A list-field replacement.
///
/// Wrapping the values keeps "set to these values" (including "set to
/// nothing") distinguishable from an omitted field once serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUpdate {
    /// The values the list is replaced with. May be empty.
    pub set: Vec<String>,
}

impl ListUpdate {
    /// A list update that sets the given values.
    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            set: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A list update that clears the list.
    pub fn clear() -> Self {
        Self { set: Vec::new() }
    }
}

/// Map a scalar flag to a patch field.
///
/// An omitted flag and a supplied-but-empty value both leave the field
/// untouched: flags cannot clear a scalar, only a full replace can.
pub fn scalar(flag: Option<&str>) -> Option<String> {
    flag.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Map a list flag to a patch field.
///
/// An omitted flag leaves the field untouched. A single empty-string element
/// is the explicit-clear sentinel; any other values replace the list.
pub fn list(flag: Option<&[String]>) -> Option<ListUpdate> {
    let values = flag?;
    if values.len() == 1 && values[0].is_empty() {
        return Some(ListUpdate::clear());
    }
    Some(ListUpdate::set(values.iter().cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Trunk {
        #[serde(default, skip_serializing_if = "String::is_empty")]
        sip_trunk_id: String,
        #[serde(default)]
        name: String,
    }

    impl ReplacePayload for Trunk {
        fn take_id(&mut self) -> String {
            std::mem::take(&mut self.sip_trunk_id)
        }
    }

    #[derive(Debug, Default, PartialEq, Serialize)]
    struct TrunkPatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        numbers: Option<ListUpdate>,
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_positionals_rejected() {
        let err = resolve_update::<Trunk, TrunkPatch, _>(
            Some("ST_1"),
            &args(&["{}", "{}"]),
            || Ok(TrunkPatch::default()),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "expected one JSON file or flags");
    }

    #[test]
    fn test_patch_mode_requires_id() {
        for id_flag in [None, Some("")] {
            let err = resolve_update::<Trunk, TrunkPatch, _>(id_flag, &[], || {
                Ok(TrunkPatch::default())
            })
            .unwrap_err();
            assert_eq!(err.to_string(), "no ID specified");
        }
    }

    #[test]
    fn test_replace_mode_requires_some_id() {
        let err = resolve_update::<Trunk, TrunkPatch, _>(
            None,
            &args(&[r#"{"name": "lobby"}"#]),
            || Ok(TrunkPatch::default()),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "no ID specified, use flag or set it in JSON");
    }

    #[test]
    fn test_replace_falls_back_to_embedded_id() {
        let req = resolve_update::<Trunk, TrunkPatch, _>(
            None,
            &args(&[r#"{"sip_trunk_id": "ST_999", "name": "lobby"}"#]),
            || Ok(TrunkPatch::default()),
        )
        .unwrap();

        assert_eq!(req.id, "ST_999");
        match req.action {
            UpdateAction::Replace(trunk) => {
                // The embedded identifier travels alongside the request, not in it.
                assert_eq!(trunk.sip_trunk_id, "");
                assert_eq!(trunk.name, "lobby");
            }
            UpdateAction::Update(_) => panic!("expected replace"),
        }
    }

    #[test]
    fn test_id_flag_wins_over_embedded_id() {
        let req = resolve_update::<Trunk, TrunkPatch, _>(
            Some("ST_123"),
            &args(&[r#"{"sip_trunk_id": "ST_999", "name": "lobby"}"#]),
            || Ok(TrunkPatch::default()),
        )
        .unwrap();

        assert_eq!(req.id, "ST_123");
        assert!(matches!(req.action, UpdateAction::Replace(_)));
    }

    #[test]
    fn test_patch_mode_builds_patch() {
        let req = resolve_update::<Trunk, _, _>(Some("ST_123"), &[], || {
            Ok(TrunkPatch {
                name: scalar(Some("front-desk")),
                numbers: list(None),
            })
        })
        .unwrap();

        assert_eq!(req.id, "ST_123");
        assert_eq!(
            req.action,
            UpdateAction::Update(TrunkPatch {
                name: Some("front-desk".to_string()),
                numbers: None,
            })
        );
    }

    #[test]
    fn test_patch_errors_propagate() {
        let err = resolve_update::<Trunk, TrunkPatch, _>(Some("ST_123"), &[], || {
            Err(SipError::InvalidInput(
                "unsupported transport: \"SIP_TRANSPORT_WSS\"".to_string(),
            ))
        })
        .unwrap_err();
        assert!(err.to_string().contains("unsupported transport"));
    }

    #[test]
    fn test_scalar_empty_is_absent() {
        assert_eq!(scalar(None), None);
        assert_eq!(scalar(Some("")), None);
        assert_eq!(scalar(Some("front-desk")), Some("front-desk".to_string()));
    }

    #[test]
    fn test_list_clear_sentinel() {
        // Flag never set: field untouched.
        assert_eq!(list(None), None);
        // Single empty element: explicit clear.
        assert_eq!(
            list(Some(&["".to_string()])),
            Some(ListUpdate::clear())
        );
        // Anything else: replace with the values.
        assert_eq!(
            list(Some(&["+1".to_string(), "+2".to_string()])),
            Some(ListUpdate::set(["+1", "+2"]))
        );
        // Clear and absent must never be observably identical.
        assert_ne!(list(Some(&["".to_string()])), list(None));
    }

    #[test]
    fn test_action_envelope_shape() {
        let replace: UpdateAction<Trunk, TrunkPatch> = UpdateAction::Replace(Trunk {
            sip_trunk_id: String::new(),
            name: "lobby".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&replace).unwrap(),
            serde_json::json!({"replace": {"name": "lobby"}})
        );

        let update: UpdateAction<Trunk, TrunkPatch> = UpdateAction::Update(TrunkPatch {
            name: None,
            numbers: Some(ListUpdate::clear()),
        });
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"update": {"numbers": {"set": []}}})
        );
    }

    #[test]
    fn test_replace_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"sip_trunk_id": "ST_7", "name": "ops"}}"#).unwrap();

        let req = resolve_update::<Trunk, TrunkPatch, _>(
            None,
            &args(&[file.path().to_str().unwrap()]),
            || Ok(TrunkPatch::default()),
        )
        .unwrap();
        assert_eq!(req.id, "ST_7");
    }
}
