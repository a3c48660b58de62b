use rstest::{fixture, rstest};
use streamlab::application::{self, ApplicationError, RunContext};
use streamlab::config::Settings;
use streamlab::domain::ExecutionMode;
use streamlab::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[fixture]
fn ctx() -> RunContext {
    RunContext::new(" ", ExecutionMode::Parallel)
}

#[rstest]
#[case("for-each", &["长沙 深圳 武汉 伊犁 洛阳 开封", "长沙 深圳 武汉 伊犁 洛阳 开封"])]
#[case("filter", &["28 19 22 39 33 44 33 23"])]
#[case("map", &["How Are You , I Am Fine !"])]
#[case("of", &["[[1, 2, 3], [41, 52, 63]]"])]
#[case("of-values", &["覆巢之下 安有完卵 天下攘攘 皆为利往"])]
#[case("distinct", &["秦汗 武汉 汉武 大楚"])]
#[case("flat-map", &["2 4 6 82 102 122"])]
#[case("builder", &["[大秦, 大商, 大魏]"])]
#[case("collect-set", &["a b c d e"])]
#[case("sorted", &["a b c d e", "e d c b a"])]
#[case("count", &["5"])]
#[case("min-max", &["22 465"])]
#[case("skip-limit", &["c d e"])]
#[case("concat", &["a b 110 120"])]
#[case("any-match", &["true true"])]
#[case("all-match", &["true,false"])]
#[case("reduce-join", &["you,give,me,stop"])]
#[case("reduce-decimal", &["66.66"])]
#[case("find-first", &["you"])]
#[case("int-range-sum", &["10"])]
#[case("double-sum", &["89.24"])]
#[case("int-reduce", &["106"])]
#[case("decimal-reduce", &["11"])]
fn given_example_when_run_then_prints_expected_lines(
    ctx: RunContext,
    #[case] name: &str,
    #[case] expected: &[&str],
) {
    let report = application::run(name, &ctx).unwrap();
    assert_eq!(report.name, name);
    assert_eq!(report.lines, expected);
}

#[rstest]
fn given_find_any_when_run_then_prints_one_member(ctx: RunContext) {
    let report = application::run("find-any", &ctx).unwrap();
    assert_eq!(report.lines.len(), 1);
    assert!(["you", "give", "me", "stop"].contains(&report.lines[0].as_str()));
}

#[rstest]
fn given_sequential_mode_when_find_any_then_first() {
    let ctx = RunContext::new(" ", ExecutionMode::Sequential);
    let report = application::run("find-any", &ctx).unwrap();
    assert_eq!(report.lines, vec!["you"]);
}

#[rstest]
fn given_default_context_when_filter_then_tab_separated() {
    let report = application::run("filter", &RunContext::default()).unwrap();
    assert_eq!(report.lines, vec!["28\t19\t22\t39\t33\t44\t33\t23"]);
}

#[rstest]
fn given_unknown_name_when_run_then_unknown_example(ctx: RunContext) {
    let err = application::run("no-such-example", &ctx).unwrap_err();
    assert!(matches!(err, ApplicationError::UnknownExample(ref n) if n == "no-such-example"));
}

#[rstest]
fn given_catalog_when_run_all_then_every_example_in_order(ctx: RunContext) {
    let reports = application::run_all(&ctx).unwrap();
    let names: Vec<_> = reports.iter().map(|r| r.name).collect();
    let expected: Vec<_> = application::catalog().iter().map(|e| e.name).collect();
    assert_eq!(names, expected);
    assert!(reports.iter().all(|r| !r.lines.is_empty()));
}

#[rstest]
fn given_thread_setting_when_context_built_then_examples_run_on_pool() {
    let settings = Settings {
        separator: ",".into(),
        parallel: true,
        threads: Some(2),
    };
    let ctx = RunContext::from_settings(&settings).unwrap();
    let report = application::run("any-match", &ctx).unwrap();
    assert_eq!(report.lines, vec!["true,true"]);
}

#[rstest]
fn given_sequential_settings_when_context_built_then_sequential_mode() {
    let settings = Settings {
        parallel: false,
        ..Settings::default()
    };
    let ctx = RunContext::from_settings(&settings).unwrap();
    assert_eq!(ctx.mode, ExecutionMode::Sequential);
    assert_eq!(ctx.separator, "\t");
}
