use cqlmap::{doc, Document, MappingOptions, ModelMapper, Value};
use pretty_assertions::assert_eq;
use tests::video;

async fn seed(videos: &ModelMapper, count: i64) {
    for added in 0..count {
        let doc = doc! {
            "id" => format!("v{added}"),
            "userId" => "u1",
            "addedDate" => Value::Timestamp(added),
            "yyyymmdd" => "20240101",
            "name" => "clip",
        };
        videos.insert(&doc, &MappingOptions::new()).await.unwrap();
    }
}

#[tokio::test]
async fn pages_concatenate_to_the_full_result() {
    let mut h = video::harness();
    let videos = h.mapper.for_model("Video");
    seed(&videos, 7).await;

    let filter = doc! { "userId" => "u1" };
    let everything: Vec<Document> = videos
        .find(&filter, &MappingOptions::new())
        .await
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(everything.len(), 7);

    h.log().clear();

    let mut paged = vec![];
    let mut sizes = vec![];
    let mut options = MappingOptions::new().fetch_size(3);

    loop {
        let page = videos.find(&filter, &options).await.unwrap();
        sizes.push(page.len());

        let next = page.page_state().cloned();
        paged.extend(page);

        match next {
            Some(page_state) => options = options.page_state(page_state),
            None => break,
        }
    }

    assert_eq!(sizes, [3, 3, 1]);
    assert_eq!(paged, everything);

    assert_eq!(h.log().len(), 3);
    h.log().with_ops(|ops| {
        assert!(ops.iter().all(|op| op.options.fetch_size == Some(3)));
        assert!(ops[0].options.page_state.is_none());
        assert!(ops[1].options.page_state.is_some());
    });
}

#[tokio::test]
async fn single_page_has_no_page_state() {
    let h = video::harness();
    let videos = h.mapper.for_model("Video");
    seed(&videos, 2).await;

    let page = videos
        .find(&doc! { "userId" => "u1" }, &MappingOptions::new().fetch_size(5))
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.page_state().is_none());
}
