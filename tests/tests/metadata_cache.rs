use cqlmap::{doc, MappingOptions};
use std::time::Duration;
use tests::video;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_use_fetches_each_table_once() {
    let h = video::harness();
    h.store.set_metadata_delay(Duration::from_millis(50));

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let videos = h.mapper.for_model("Video");
            tokio::spawn(async move {
                videos
                    .find(&doc! { "id" => format!("v{i}") }, &MappingOptions::new())
                    .await
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().unwrap().is_empty());
    }

    // videos, user_videos, latest_videos
    assert_eq!(h.store.metadata_fetches(), 3);

    h.mapper
        .for_model("Video")
        .find_all(&MappingOptions::new())
        .await
        .unwrap();
    assert_eq!(h.store.metadata_fetches(), 3);
}

#[tokio::test]
async fn models_share_table_metadata() {
    let h = video::harness();
    let none = MappingOptions::new();

    h.mapper.for_model("Video").find_all(&none).await.unwrap();
    assert_eq!(h.store.metadata_fetches(), 3);

    // `videos` is already known; only video_summaries and videos_by_name
    // are fetched.
    h.mapper.for_model("VideoSummary").find_all(&none).await.unwrap();
    assert_eq!(h.store.metadata_fetches(), 5);
}

#[tokio::test]
async fn clones_share_the_cache() {
    let h = video::harness();
    let clone = h.mapper.clone();

    h.mapper
        .for_model("Video")
        .find_all(&MappingOptions::new())
        .await
        .unwrap();
    clone
        .for_model("Video")
        .find_all(&MappingOptions::new())
        .await
        .unwrap();

    assert_eq!(h.store.metadata_fetches(), 3);
}
