use uuid::Uuid;

/// Whether `actor` may modify a message whose stored sender is `owner`.
///
/// The actor id comes straight from the request body; nothing proves the
/// caller really is that person. A message whose sender was deleted has no
/// owner and can no longer be modified.
pub fn is_owner(actor: Uuid, owner: Option<Uuid>) -> bool {
    owner == Some(actor)
}
