//! Test utilities and line classification tests

use super::*;
use pretty_assertions::assert_eq;


/// Create a span for use in testing, usually from a static string
pub(super) fn create_span(s: &str) -> Span {
    Span::new(s)
}

fn header<'a>(name: &'a str, dependencies: &'a str) -> Line<'a> {
    Line::Header(Header { name, dependencies })
}

#[test]
fn blank_lines() {
    assert_eq!(classify(""), Line::Blank);
    assert_eq!(classify("   \t "), Line::Blank);
}

#[test]
fn comments() {
    assert_eq!(classify("# a comment"), Line::Blank);
    assert_eq!(classify("\t  # indented comment: with a colon"), Line::Blank);
}

#[test]
fn assignment_flavors() {
    for line in &["CC = gcc", "CC := gcc", "CC += gcc", "CC ?= gcc", "CC=gcc"] {
        assert_eq!(
            classify(line),
            Line::Assignment {
                name: "CC",
                value: "gcc"
            },
            "{:?}",
            line
        );
    }
}

#[test]
fn assignment_value_trimmed() {
    assert_eq!(
        classify("  CFLAGS   =   -O2 -Wall   "),
        Line::Assignment {
            name: "CFLAGS",
            value: "-O2 -Wall"
        }
    );
}

#[test]
fn assignment_empty_value() {
    assert_eq!(
        classify("EMPTY ="),
        Line::Assignment {
            name: "EMPTY",
            value: ""
        }
    );
}

#[test]
fn assignment_value_keeps_references() {
    assert_eq!(
        classify("OUT = $(BUILD_DIR)/out"),
        Line::Assignment {
            name: "OUT",
            value: "$(BUILD_DIR)/out"
        }
    );
}

#[test]
fn lowercase_assignment_is_not_a_variable() {
    assert_eq!(classify("cc = gcc"), Line::Unrecognized);
    assert_eq!(classify("cc := gcc"), Line::Unrecognized);
}

#[test]
fn indented_assignment_still_assigns() {
    assert_eq!(
        classify("\tMODE = debug"),
        Line::Assignment {
            name: "MODE",
            value: "debug"
        }
    );
}

#[test]
fn simple_header() {
    assert_eq!(classify("build: clean"), header("build", "clean"));
    assert_eq!(classify("clean:"), header("clean", ""));
}

#[test]
fn header_name_characters() {
    assert_eq!(
        classify("out/app-v1.2_x : src/main.c lib.a"),
        header("out/app-v1.2_x", "src/main.c lib.a")
    );
}

#[test]
fn uppercase_header_is_not_an_assignment() {
    assert_eq!(classify("ALL: a b"), header("ALL", "a b"));
}

#[test]
fn header_with_equals_is_ignored() {
    assert_eq!(classify("foo: CFLAGS=-O2"), Line::Unrecognized);
}

#[test]
fn header_after_single_space() {
    assert_eq!(classify(" lint: fmt"), header("lint", "fmt"));
}

#[test]
fn indented_header_is_a_recipe() {
    assert_eq!(classify("\tfoo: bar"), Line::Recipe("foo: bar"));
    assert_eq!(classify("  foo: bar"), Line::Recipe("foo: bar"));
}

#[test]
fn header_ending_in_backslash_is_unrecognized() {
    assert_eq!(classify("foo: \\"), Line::Unrecognized);
}

#[test]
fn special_header_still_classifies_as_header() {
    assert_eq!(classify(".PHONY: build clean"), header(".PHONY", "build clean"));
}

#[test]
fn recipe_lines() {
    assert_eq!(
        classify("\tgcc -o out.bin main.c"),
        Line::Recipe("gcc -o out.bin main.c")
    );
    assert_eq!(classify("    echo hi"), Line::Recipe("echo hi"));
    assert_eq!(classify("\t \t@echo mixed"), Line::Recipe("@echo mixed"));
}

#[test]
fn single_space_is_not_a_recipe() {
    assert_eq!(classify(" echo hi"), Line::Unrecognized);
}

#[test]
fn garbage_is_unrecognized() {
    assert_eq!(classify("include other.mk"), Line::Unrecognized);
    assert_eq!(classify("%.o: %.c"), Line::Unrecognized);
}

#[test]
fn dependencies_split_on_whitespace() {
    let h = Header {
        name: "all",
        dependencies: "a  b\tc",
    };
    assert_eq!(h.dependencies(), vec!["a", "b", "c"]);

    let h = Header {
        name: "all",
        dependencies: "",
    };
    assert!(h.dependencies().is_empty());
}

#[test]
fn parse_header_rejects_indentation() {
    assert_eq!(parse_header("\tfoo: bar"), None);
    assert_eq!(
        parse_header("foo:   bar   baz"),
        Some(Header {
            name: "foo",
            dependencies: "bar   baz"
        })
    );
}

#[test]
fn collapse_two_lines() {
    let lines = ["foo: \\", "    bar baz", "\techo"];
    let (merged, consumed) = collapse_continuation(&lines);
    assert_eq!(consumed, 2);
    assert_eq!(merged, "foo:      bar baz");
}

#[test]
fn collapse_many_lines() {
    let lines = ["all: a \\", "b \\", "c", "d"];
    let (merged, consumed) = collapse_continuation(&lines);
    assert_eq!(consumed, 3);
    assert_eq!(merged, "all: a  b  c");
}

#[test]
fn collapse_at_end_of_input() {
    let lines = ["all: a \\"];
    let (merged, consumed) = collapse_continuation(&lines);
    assert_eq!(consumed, 1);
    assert_eq!(merged, "all: a ");
}

#[test]
fn assignment_parser_leftovers() {
    let (leftover, (name, value)) = assignment(create_span("X?=1")).unwrap();
    assert_eq!(*name.fragment(), "X");
    assert_eq!(*value.fragment(), "1");
    assert_eq!(*leftover.fragment(), "");
}
