//! 启动流程测试 - 真实文件数据库，验证迁移与默认数据只写一次

use pos_server::{AppError, Config, ServerState};
use shared::models::{Role, UserCreate};

#[tokio::test]
async fn initialize_seeds_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);

    let first = ServerState::initialize(&config).await.unwrap();
    assert_eq!(first.dishes.list().await.unwrap().len(), 16);
    first.pool.close().await;

    let second = ServerState::initialize(&config).await.unwrap();
    assert_eq!(second.dishes.list().await.unwrap().len(), 16);
    assert_eq!(second.users.list().await.unwrap().len(), 3);
    assert!(config.database_dir().exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_keep_usernames_unique() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await.unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let users = state.users.clone();
            tokio::spawn(async move {
                users
                    .create(UserCreate {
                        username: "dup".into(),
                        password: "secret1".into(),
                        name: format!("收银员{i}"),
                        role: Role::Staff,
                        active: true,
                    })
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert!(matches!(err, AppError::Conflict(_)), "{err:?}"),
        }
    }
    assert_eq!(created, 1);

    let all = state.users.list().await.unwrap();
    assert_eq!(all.iter().filter(|u| u.username == "dup").count(), 1);
    assert_eq!(all.len(), 4);
}
