// Integration tests for the interpreter pipeline

use pretty_assertions::assert_eq;
use quill::interpreter::config::{CallScoping, InterpreterConfig};
use quill::interpreter::engine::Interpreter;
use quill::memory::value::Value;
use quill::terminal::Terminal;

fn run_output(source: &str) -> Vec<String> {
    quill::run(source, InterpreterConfig::default(), Terminal::capture())
        .expect("Execution failed")
        .get_output()
}

#[test]
fn test_while_loop_counts() {
    let source = r#"
        var i = 0;
        while i < 3 {
            print(i);
            i = i + 1;
        }
    "#;
    assert_eq!(run_output(source), vec!["0", "1", "2"]);
}

#[test]
fn test_arithmetic_precedence_and_division() {
    let source = r#"
        print(2 + 3 * 4);
        print((2 + 3) * 4);
        print(7 / 2);
        print(8 / 2 / 2);
    "#;
    assert_eq!(run_output(source), vec!["14", "20", "3", "2"]);
}

#[test]
fn test_print_each_argument_on_own_line() {
    let source = r#"print("a", 1, true, "b \"quoted\"");"#;
    assert_eq!(run_output(source), vec!["a", "1", "true", "b \"quoted\""]);
}

#[test]
fn test_shadowing_in_nested_block() {
    let source = r#"
        var x = 1;
        if true {
            var x = 2;
            print(x);
        }
        print(x);
    "#;
    assert_eq!(run_output(source), vec!["2", "1"]);
}

#[test]
fn test_break_inside_nested_if() {
    let source = r#"
        var i = 0;
        while true {
            if i == 3 {
                if true {
                    break;
                }
            }
            i = i + 1;
        }
        print(i);
    "#;
    assert_eq!(run_output(source), vec!["3"]);
}

#[test]
fn test_return_from_loop_inside_function() {
    let source = r#"
        fn find(target) {
            var i = 0;
            while i < 100 {
                if i * i >= target {
                    return i;
                }
                i = i + 1;
            }
            return 0 - 1;
        }
        print(find(50));
        print(find(100000));
    "#;
    assert_eq!(run_output(source), vec!["8", "-1"]);
}

#[test]
fn test_no_short_circuit() {
    let source = r#"
        fn touch() {
            print("evaluated");
            return true;
        }
        var a = false and touch();
        var b = true or touch();
        print(a, b);
    "#;
    assert_eq!(
        run_output(source),
        vec!["evaluated", "evaluated", "false", "true"]
    );
}

#[test]
fn test_mutual_recursion_after_both_defined() {
    let source = r#"
        fn is_even(n) {
            if n == 0 { return true; }
            return is_odd(n - 1);
        }
        fn is_odd(n) {
            if n == 0 { return false; }
            return is_even(n - 1);
        }
        print(is_even(10), is_odd(7));
    "#;
    assert_eq!(run_output(source), vec!["true", "true"]);
}

#[test]
fn test_function_redefinition_replaces() {
    let source = r#"
        fn f() { return 1; }
        print(f());
        fn f() { return 2; }
        print(f());
    "#;
    assert_eq!(run_output(source), vec!["1", "2"]);
}

#[test]
fn test_function_updates_global() {
    let source = r#"
        var counter = 0;
        fn bump() { counter = counter + 1; }
        bump();
        bump();
        print(counter);
    "#;
    assert_eq!(run_output(source), vec!["2"]);
}

#[test]
fn test_caller_scoping_sees_caller_locals() {
    let source = r#"
        var n = 0;
        fn report() { print(n); }
        if true {
            var n = 42;
            report();
        }
    "#;

    assert_eq!(run_output(source), vec!["0"]);

    let config = InterpreterConfig {
        call_scoping: CallScoping::Caller,
        ..InterpreterConfig::default()
    };
    let terminal = quill::run(source, config, Terminal::capture()).unwrap();
    assert_eq!(terminal.get_output(), vec!["42"]);
}

#[test]
fn test_interpreter_can_rerun_program() {
    let program = quill::parse("var x = 5; print(x * 2);").unwrap();
    let mut interpreter = Interpreter::new(program, Terminal::capture());

    interpreter.run().unwrap();
    interpreter.run().unwrap();

    assert_eq!(interpreter.terminal().get_output(), vec!["10", "10"]);
    assert_eq!(interpreter.global("x"), Some(&Value::Number(5)));
}

#[test]
fn test_captured_lines_carry_call_location() {
    let terminal = quill::run(
        "var x = 1;\n  print(x);",
        InterpreterConfig::default(),
        Terminal::capture(),
    )
    .unwrap();
    assert_eq!(terminal.lines.len(), 1);
    assert_eq!(terminal.lines[0].location.line, 2);
    assert_eq!(terminal.lines[0].location.column, 3);
}

#[test]
fn test_ast_dump() {
    let program = quill::parse("var x = 1 + 2; print(x);").unwrap();
    assert_eq!(
        program.to_string(),
        "(block (declaration x (additive (number 1) + (number 2))) (call print (identifier x)))"
    );
}
