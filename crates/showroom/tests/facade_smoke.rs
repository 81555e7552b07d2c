//! Drive a page through the facade prelude only.

use showroom::prelude::*;
use web_time::{Duration, Instant};

#[test]
fn prelude_is_enough_to_run_a_page() -> Result<()> {
    let t0 = Instant::now();
    let layout = PageLayout {
        metrics: DocumentMetrics::new(3000.0, Viewport::new(1024.0, 768.0)),
        ..PageLayout::default()
    };
    let mut page = ShowroomPage::new(&InteractionConfig::default(), layout, PageContent::default(), t0);

    page.handle_event(&Event::Scroll { offset: 500.0 }, t0);
    assert_eq!(page.view().header.mode, HeaderMode::CollapsedIdle);

    let err = page.send(PageMsg::SubmitForm, t0).map_err(Error::from).unwrap_err();
    assert_eq!(err.recovery(), RecoveryAction::KeepEditing);
    assert_eq!(err.missing_fields().len(), 3);

    for field in ["name", "phone", "message"] {
        page.send(
            PageMsg::EditField {
                field: field.into(),
                value: "x".into(),
            },
            t0,
        )?;
    }
    page.send(PageMsg::SubmitForm, t0)?;
    page.advance(t0 + Duration::from_millis(1500));
    assert_eq!(page.view().form, FormStatus::Submitted);

    page.dispose();
    assert!(page.host().is_idle());
    Ok(())
}
