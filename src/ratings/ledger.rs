use crate::reviews::types::{HelpfulVote, Review};
use crate::store::{Store, StoreError};
use crate::users::types::UserId;

/// Applies one reader's helpful/unhelpful verdict to a review's vote ledger
/// and returns the updated tally.
///
/// - First vote from this reader: append an entry, move the tally by one.
/// - Same verdict as their existing entry: nothing changes.
/// - Opposite verdict: flip the entry in place and move the tally by two
///   (one vote retracted, the opposite cast).
///
/// Ledger and tally are persisted together in a single review write, so no
/// reader of the store can see one without the other. The caller has already
/// ruled out the review's own author as the voter.
pub async fn apply_helpful_vote(
    store: &Store,
    mut review: Review,
    voter_id: &UserId,
    is_helpful: bool,
) -> Result<i64, StoreError> {
    match review
        .helpful_votes
        .iter_mut()
        .find(|vote| vote.user_id == *voter_id)
    {
        Some(vote) if vote.is_helpful == is_helpful => {}
        Some(vote) => {
            vote.is_helpful = is_helpful;
            review.helpful += if is_helpful { 2 } else { -2 };
        }
        None => {
            review.helpful_votes.push(HelpfulVote {
                user_id: voter_id.clone(),
                is_helpful,
            });
            review.helpful += if is_helpful { 1 } else { -1 };
        }
    }

    let tally = review.helpful;
    store.save_review(review).await?;
    Ok(tally)
}
