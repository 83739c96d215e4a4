use std::{fs, path::Path};

use tempfile::TempDir;
use uro::{
    error::{Error, ParseError, RuntimeError},
    run,
};

fn output_in(src: &str, location: &Path) -> String {
    let mut out = Vec::new();
    if let Err(e) = run(src, location, &mut out) {
        panic!("Script failed: {e}\n{src}");
    }
    String::from_utf8(out).expect("output is not utf-8")
                          .trim_end()
                          .to_string()
}

fn output(src: &str) -> String {
    output_in(src, Path::new("."))
}

fn assert_output(src: &str, expected: &[&str]) {
    assert_eq!(output(src), expected.join("\n"), "script: {src}");
}

fn assert_success(src: &str) {
    let mut out = Vec::new();
    if let Err(e) = run(src, Path::new("."), &mut out) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) -> Error {
    let mut out = Vec::new();
    match run(src, Path::new("."), &mut out) {
        Ok(()) => panic!("Script succeeded but was expected to fail: {src}"),
        Err(e) => e,
    }
}

/// A directory with thirty text files `ex_01.txt` .. `ex_30.txt` of 27 bytes
/// each inside `many texts`, plus a few loose entries.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let texts = dir.path().join("many texts");
    fs::create_dir(&texts).unwrap();
    for i in 1..=30 {
        fs::write(texts.join(format!("ex_{i:02}.txt")), "twenty seven bytes of text\n").unwrap();
    }
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::create_dir(dir.path().join("existing_empty_dir")).unwrap();
    dir
}

#[test]
fn printing_and_statement_separators() {
    assert_output("print 'hello world'", &["hello world"]);
    assert_output(" 'hello world'   ", &["hello world"]);
    assert_output("print 2, 2*25, 1", &["2", "50", "1"]);
    assert_output("print 2*2<3; 14 = 2*7", &["0", "1"]);
    assert_output("print 'g'; 3 times { print 'hello' } print 'h' ",
                  &["g", "hello", "hello", "hello", "h"]);
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("print 2 +2*2", &["6"]);
    assert_output("print (2*4)+(6*8)", &["56"]);
    assert_output("print -((2*4)+(6*8))+156", &["100"]);
    assert_output("print 2*2+-3*3", &["-5"]);
    assert_output("print 2+2 = 3.5 + 0.5", &["1"]);
    assert_output("print 2+2 < 4 - 0.0", &["0"]);
    assert_output("print 7 % 3, 9 / 3", &["1", "3"]);
}

#[test]
fn text_concatenation_chains() {
    assert_output("print 'hello' + ' ' + 'worlds'", &["hello worlds"]);
    assert_output("print 2 + '5' ", &["25"]);
    assert_output("print '2' + 75 + 5 ", &["280"]);
    assert_output("print '2' + 75 days + 2 days + 5 ", &["277 days5"]);
    assert_output("print '2' + 3 august 2010 + 2 + 5 ", &["23 August 20107"]);
    assert_output("print '2' + 3 august 2010 + 2 days + 1 day ", &["26 August 2010"]);
    assert_output("print '2' + 3 august 2010 + 2 days + 1 day + 16 ", &["26 August 201016"]);
}

#[test]
fn logic_operators() {
    assert_output("print true and true xor false", &["1"]);
    assert_output("print true or true xor true", &["0"]);
    assert_output("print not false or not true xor true", &["0"]);
    assert_output("if true and false {43 } else {  21}", &["21"]);
    assert_output("if false {   43 } else if false{} else {21 } ", &["21"]);
    assert_output("if false {   43 } else if true{5} else {21 } ", &["5"]);
}

#[test]
fn text_comparisons() {
    assert_output("print 'abc' = 'ab' + 'c' ", &["1"]);
    assert_output("print 'Abc' = 'abc' ", &["0"]);
    assert_output("print 'a' < 'abc', 'a' >= 'abc'", &["1", "0"]);
}

#[test]
fn tuple_comparisons() {
    assert_output("print (2, 3) = (3, 2)", &["0"]);
    assert_output("print (3, 2) <= (2, 3)", &["1"]);
    assert_output("print (3, 2) < (2, 3, 1)", &["1"]);
    assert_output("print (1, 2, 3) >= (2, 3, 1)", &["1"]);
    assert_output("print ('1', 2, 3) = (1, 2, '3')", &["1"]);
}

#[test]
fn variables_are_case_insensitive() {
    assert_output("A = 5; a = 3; print A", &["3"]);
    assert_output("a = true; a = a xor true; print a", &["0"]);
    assert_output("a = 2,3,4; print a, 5, a", &["2", "3", "4", "5", "2", "3", "4"]);
}

#[test]
fn string_index_assignment() {
    assert_output("a = 'true'; a[1] = 't'; print a", &["ttue"]);
    assert_output("a = 'true'; a[1] = ''; print a", &["tue"]);
    assert_output("a = 'true'; a[1] = '234'; print a", &["t234ue"]);
    assert_output("a = 'true'; a += 'tu'; print a", &["truetu"]);
    assert_output("a = 'true'; print a[0], a[10] = ''", &["t", "1"]);
}

#[test]
fn increments_and_time_fields() {
    assert_output("a = -13; a++; print a", &["-12"]);
    assert_output("a = -108.24; a--; print a", &["-109.24"]);
    assert_output("a = 10.2; a++; print a", &["11.2"]);
    assert_output("a = 30 june 2004; a.day--; print a", &["29 June 2004"]);
    assert_output("a = 30 june 2004; a.day++; print a", &["1 July 2004"]);
    assert_output("a = 12 juNe 2004; a.year++; print a", &["12 June 2005"]);
    assert_output("a = 12 june 2004; a { this + 1 day}", &["13 June 2004"]);
}

#[test]
fn periods() {
    assert_output("a = 3 DAys; print a + a", &["6 days"]);
    assert_output("a = 3 DAys; print a - a", &["no period"]);
}

#[test]
fn apply_blocks_bind_this_and_index() {
    assert_output("a = 2,3,4; a { print index }", &["0", "1", "2"]);
    assert_output("a = 2,3,4; a{print }", &["2", "3", "4"]);
    assert_output("2,3,4{3 + this * 2 }", &["7", "9", "11"]);
    assert_output("2,'3',4{3 + this }", &["32", "33", "34"]);
}

#[test]
fn pipeline_stages_run_in_order() {
    assert_output("a = 1,2,3,4,5,6,7,8; print a skip 1 every 2 limit 3", &["2", "4", "6"]);
    assert_output("a = 0,1,2,3,4,5,6,7,8; print a where this > 5", &["6", "7", "8"]);
    assert_output("gh = 30, -2, 6, 3,23.3,1; gh order desc",
                  &["30", "23.3", "6", "3", "1", "-2"]);
    assert_output("gh = 30, -2, 6, 3,23.3,1; gh order by absolute(this) asc",
                  &["1", "-2", "3", "6", "23.3", "30"]);
    assert_output("a = 1,2,3,4,5; print a final 2", &["4", "5"]);
}

#[test]
fn ordering_mixed_tuples() {
    assert_output("print (2, 'b'), (1, 0), (3, 'a') order", &["1, 0", "2, b", "3, a"]);

    let tuples = (0..64).map(|i| {
                            if i % 3 == 0 {
                                format!("({i}, 'x')")
                            } else {
                                format!("({}, 0)", (i * 37) % 64)
                            }
                        })
                        .collect::<Vec<_>>();
    let src = format!("a = {}; print count(a order), count(a order desc)", tuples.join(", "));
    assert_output(&src, &["64", "64"]);
}

#[test]
fn builtin_functions() {
    assert_output("print sum(1, 2, 3), average(2, 4), median(5, 1, 3)", &["6", "3", "3"]);
    assert_output("print min(4, 2, 8), max(4, 2, 8)", &["2", "8"]);
    assert_output("print upper('abc'), reverse('abc'), length('hello')", &["ABC", "cba", "5"]);
    assert_output("print left('hello', 2), right('hello', 3)", &["he", "llo"]);
    assert_output("print power(2, 10), absolute(-4), sign(-3)", &["1024", "4", "-1"]);
    assert_output("print 'photo.jpg' like '%.jpg', 'a1' like 'a#'", &["1", "1"]);
    assert_output("print 3 in 1, 2, 3", &["1"]);
}

#[test]
fn loops() {
    assert_output("a = 0; while a < 3 { a++ }; print a", &["3"]);
    assert_output("2 times { 'x' }", &["x", "x"]);
}

#[test]
fn break_and_continue_end_the_innermost_loop() {
    assert_output("a = 0; while true { a++; if a = 3 { break } }; print a", &["3"]);
    assert_output("a = 0; b = 0; while a < 5 { a++; if a % 2 = 0 { continue }; b++ }; print b",
                  &["3"]);
    assert_output("1,2,3,4 { if this = 3 { break }; print }", &["1", "2"]);
    assert_output("1,2,3 { if this = 2 { continue }; print }", &["1", "3"]);
    assert_output("2 times { 3 times { print 'in'; break }; print 'out' }",
                  &["in", "out", "in", "out"]);
}

#[test]
fn exit_stops_the_program_successfully() {
    assert_output("print 1; exit; print 2", &["1"]);
    assert_output("1,2,3 { print; if this = 2 { exit } }; print 'after'", &["1", "2"]);
    assert_output("3 times { 2 times { exit } }; print 'after'", &[""]);
}

#[test]
fn error_stops_the_program_with_a_failure() {
    let mut out = Vec::new();
    let result = run("print 1\nerror\nprint 2", Path::new("."), &mut out);
    let Err(error) = result else {
        panic!("error statement did not fail");
    };
    assert_eq!(error.to_string(), "Error on line 2: Program stopped with 'error'.");
    assert_eq!(error.exit_code(), 2);
    assert_eq!(String::from_utf8(out).unwrap(), "1\n");
}

#[test]
fn break_outside_of_a_loop_fails() {
    assert!(matches!(assert_failure("break"),
                     Error::Runtime(RuntimeError::OutsideLoop { keyword: "break", line: 1 })));
    assert!(matches!(assert_failure("print 1\nif true { continue }"),
                     Error::Runtime(RuntimeError::OutsideLoop { keyword: "continue",
                                                                line:    2, })));
}

#[test]
fn listing_files_inside_a_directory() {
    let dir = fixture();
    let run_here = |src: &str| output_in(src, dir.path());

    assert_eq!(run_here("countInside(files, 'many texts') "), "30");
    assert_eq!(run_here("inside 'many texts' { count (files) } "), "30");
    assert_eq!(run_here("inside 'many texts' { count (files where extension != 'txt') }"), "0");
    assert_eq!(run_here("inside 'many texts' { size (files) } "), "810");
    assert_eq!(run_here("inside 'many texts' { files order by name desc every 4 limit 5 skip 1 } "),
               "ex_26.txt\nex_22.txt\nex_18.txt\nex_14.txt");
    assert_eq!(run_here("inside 'many texts' { files order by name desc where right(name, 1) = 5 } "),
               "ex_25.txt\nex_15.txt\nex_05.txt");
    assert_eq!(run_here("inside 'many texts' { files order by name desc limit 1 { name, fullname, extension } }"),
               "ex_30\nex_30.txt\ntxt");
    assert_eq!(run_here("inside 'many texts' { a= 0; files {if name[3] in 0,3 {a++}}; print a } "),
               "10");
}

#[test]
fn attributes_of_missing_entries() {
    let dir = fixture();
    let run_here = |src: &str| output_in(src, dir.path());

    assert_eq!(run_here("'a.txt' { exists; size }"), "1\n5");
    assert_eq!(run_here("'existing_empty_dir' { isDirectory, isFile }"), "1\n0");
    assert_eq!(run_here("'non_existing_dir' {exists, isFile, isDirectory }"), "0\n0\n1");
    assert_eq!(run_here("'non_existing_file.txt' {exists, isFile, isDirectory }"), "0\n1\n0");
    assert_eq!(run_here("'' {exists, isFile, isDirectory, length(path) }"), "0\n0\n0\n0");
}

#[test]
fn create_and_delete_report_each_entry() {
    let dir = fixture();
    let run_here = |src: &str| output_in(src, dir.path());

    assert_eq!(run_here("create 'existing_empty_dir'"), "Failed to create 'existing_empty_dir'");
    assert_eq!(run_here("force create 'existing_empty_dir'"),
               "Create directory 'existing_empty_dir'");
    assert_eq!(run_here("create 'notes.txt'; print success"), "Create file 'notes.txt'\n1");
    assert!(dir.path().join("notes.txt").is_file());

    assert_eq!(run_here("delete 'notes.txt'"), "Delete 'notes.txt'");
    assert!(!dir.path().join("notes.txt").exists());
    assert_eq!(run_here("delete 'notes.txt'; print success"), "Failed to delete 'notes.txt'\n0");
}

#[test]
fn rename_move_and_copy() {
    let dir = fixture();
    let run_here = |src: &str| output_in(src, dir.path());

    assert_eq!(run_here("rename 'a.txt' to 'b.txt'"), "Rename 'a.txt' to 'b.txt'");
    assert!(dir.path().join("b.txt").is_file());

    assert_eq!(run_here("copy 'b.txt' to 'backup'"), "Copy 'b.txt' to 'backup'");
    assert!(dir.path().join("backup").join("b.txt").is_file());

    assert_eq!(run_here("move 'b.txt' to 'backup'"), "Failed to move 'b.txt'");
    assert_eq!(run_here("force move 'b.txt' to 'backup'"), "Move 'b.txt' to 'backup'");
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn create_file_and_directory_commands() {
    let dir = fixture();
    let run_here = |src: &str| output_in(src, dir.path());

    assert_eq!(run_here("createFile 'readme'"), "Create file 'readme'");
    assert!(dir.path().join("readme").is_file());
    assert_eq!(run_here("createDirectory 'v1.0'"), "Create directory 'v1.0'");
    assert!(dir.path().join("v1.0").is_dir());

    assert_eq!(run_here("createFile 'a.txt'"), "Failed to create file 'a.txt'");
    assert_eq!(run_here("createDirectory 'existing_empty_dir'; print success"),
               "Failed to create directory 'existing_empty_dir'\n0");
    assert_eq!(run_here("force createFile 'a.txt'; 'a.txt' { size }"),
               "Create file 'a.txt'\n0");

    assert_eq!(run_here("createFiles 'f1.txt', 'f2.txt'"),
               "Create file 'f1.txt'\nCreate file 'f2.txt'");
    assert_eq!(run_here("createDirectories 'd1', 'd2'"),
               "Create directory 'd1'\nCreate directory 'd2'");
    assert!(dir.path().join("d2").is_dir());
}

#[test]
fn stack_picks_a_free_name() {
    let dir = fixture();
    let run_here = |src: &str| output_in(src, dir.path());

    assert_eq!(run_here("stack createFile 'a.txt'"), "Create file 'a(2).txt'");
    assert_eq!(run_here("stack create 'a.txt'"), "Create file 'a(3).txt'");
    assert!(dir.path().join("a(3).txt").is_file());
    assert_eq!(run_here("stack create 'existing_empty_dir'"),
               "Create directory 'existing_empty_dir(2)'");

    assert_eq!(run_here("createFile 'x.txt'; stack rename 'x.txt' to 'a.txt'"),
               "Create file 'x.txt'\nRename 'x.txt' to 'a(4).txt'");
    assert_eq!(run_here("copy 'a.txt' to 'backup'; stack copy 'a.txt' to 'backup'"),
               "Copy 'a.txt' to 'backup'\nCopy 'a.txt' to 'backup' as 'a(2).txt'");
    assert!(dir.path().join("backup").join("a(2).txt").is_file());

    assert!(matches!(assert_failure("stack delete 'a.txt'"), Error::Parse(_)));
}

#[test]
fn move_and_copy_with_a_new_name() {
    let dir = fixture();
    let run_here = |src: &str| output_in(src, dir.path());

    assert_eq!(run_here("copy 'a.txt' to 'backup' as 'b'"),
               "Copy 'a.txt' to 'backup' as 'b.txt'");
    assert_eq!(fs::read_to_string(dir.path().join("backup").join("b.txt")).unwrap(), "hello");
    assert_eq!(run_here("copy 'a.txt' to 'backup' as 'b'"), "Failed to copy 'a.txt'");
    assert_eq!(run_here("stack copy 'a.txt' to 'backup' as 'b'"),
               "Copy 'a.txt' to 'backup' as 'b(2).txt'");
    assert_eq!(run_here("copy 'a.txt' to 'backup' as 'c.md'"),
               "Copy 'a.txt' to 'backup' as 'c.md'");

    assert_eq!(run_here("force move 'a.txt' to 'backup' as 'b'"),
               "Move 'a.txt' to 'backup' as 'b.txt'");
    assert!(!dir.path().join("a.txt").exists());

    assert_eq!(run_here("move 'many texts' to 'archive' as 'texts'"),
               "Move 'many texts' to 'archive' as 'texts'");
    assert!(dir.path().join("archive").join("texts").join("ex_01.txt").is_file());
}

#[test]
fn drop_hide_and_lock() {
    let dir = fixture();
    let run_here = |src: &str| output_in(src, dir.path());

    assert_eq!(run_here("hide 'existing_empty_dir'"), "Hide 'existing_empty_dir'");
    assert_eq!(run_here("'.existing_empty_dir' { hidden, isDirectory }"), "1\n1");
    assert_eq!(run_here("hide '.existing_empty_dir'"), "Hide '.existing_empty_dir'");
    assert_eq!(run_here("unhide '.existing_empty_dir'"), "Unhide '.existing_empty_dir'");
    assert!(dir.path().join("existing_empty_dir").is_dir());
    assert_eq!(run_here("hide 'missing'"), "Failed to hide 'missing'");

    assert_eq!(run_here("lock 'a.txt'; 'a.txt' { readonly }"), "Lock 'a.txt'\n1");
    assert_eq!(run_here("unlock 'a.txt'; 'a.txt' { readonly }"), "Unlock 'a.txt'\n0");

    assert_eq!(run_here("drop 'a.txt'"), "Drop 'a.txt'");
    assert!(!dir.path().join("a.txt").exists());
    assert_eq!(run_here("drop 'a.txt'; print success"), "Failed to drop 'a.txt'\n0");
}

#[test]
fn retime_sets_modification() {
    let dir = fixture();
    let run_here = |src: &str| output_in(src, dir.path());

    assert_eq!(run_here("remodify 'a.txt' to 12 april 2017, 14:12:34"),
               "Remodify 'a.txt' to 12 April 2017, 14:12:34");
    assert_eq!(run_here("'a.txt' { print modification }"), "12 April 2017, 14:12:34");
}

#[test]
fn output_before_a_runtime_error_is_kept() {
    let mut out = Vec::new();
    let result = run("print 1; print first()", Path::new("."), &mut out);
    assert!(result.is_err());
    assert_eq!(String::from_utf8(out).unwrap(), "1\n");
}

#[test]
fn failures() {
    assert!(matches!(assert_failure("print (1 + "), Error::Parse(_)));
    assert!(matches!(assert_failure("print count('hey')"), Error::Runtime(_)));
    assert!(matches!(assert_failure("print power(2, '4')"), Error::Runtime(_)));
    assert!(matches!(assert_failure("print 1 / 0"), Error::Runtime(_)));
    assert!(matches!(assert_failure("this = 4"), Error::Parse(_)));
    assert!(matches!(assert_failure("print nosuchfunction(1)"), Error::Runtime(_)));
    assert!(matches!(assert_failure("print repeat('a', 99999999999)"), Error::Runtime(_)));
}

#[test]
fn errors_at_the_end_of_input_name_the_last_line() {
    assert!(matches!(assert_failure("print 2 +"),
                     Error::Parse(ParseError::UnexpectedEndOfInput { line: 1 })));
    assert!(matches!(assert_failure("print 1\nprint 2 +\n"),
                     Error::Parse(ParseError::UnexpectedToken { line: 2, .. })));
    assert!(matches!(assert_failure("print 1\n3 times"),
                     Error::Parse(ParseError::ExpectedBlock { line: 2 })));
    assert_eq!(assert_failure("print 2 +").to_string(),
               "Error on line 1: Unexpected end of input.");
}

#[test]
fn blank_lines_are_ignored() {
    assert_success("\n\n print 1\n\n");
}
