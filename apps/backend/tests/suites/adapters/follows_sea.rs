use conduit::adapters::{FollowRepoSea, UserRepoSea};
use conduit::repos::{FollowRepo, NewUser, UserRepo};

use super::test_db;

#[tokio::test]
async fn test_follow_edges() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db().await?;
    let users = UserRepoSea::new(db.clone());
    let follows = FollowRepoSea::new(db);

    let mut ids = Vec::new();
    for name in ["alice", "bob"] {
        let user = users
            .create(NewUser {
                email: format!("{name}@x.com"),
                username: name.to_string(),
                password_hash: "hash".to_string(),
            })
            .await?;
        ids.push(user.id);
    }
    let (alice, bob) = (ids[0], ids[1]);

    assert!(!follows.is_following(alice, bob).await?);

    follows.follow(alice, bob).await?;
    follows.follow(alice, bob).await?;
    assert!(follows.is_following(alice, bob).await?);
    assert!(!follows.is_following(bob, alice).await?);

    follows.unfollow(alice, bob).await?;
    follows.unfollow(alice, bob).await?;
    assert!(!follows.is_following(alice, bob).await?);
    Ok(())
}
