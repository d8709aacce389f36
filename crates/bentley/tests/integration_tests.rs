use bentley::*;

#[test]
fn test_basic_logging_functions() {
  // Test that basic logging functions can be called without panicking
  info("Test info message");
  warn("Test warning message");
  error("Test error message");
  debug("Test debug message");
  success("Test success message");
  verbose("Test verbose message");
}

#[test]
fn test_multiline_messages() {
  let multiline_msg = "First line\nSecond line\nThird line";
  info(multiline_msg);
  warn(multiline_msg);
  event(Level::Info, multiline_msg);
  announce(multiline_msg);
}

#[test]
fn test_macros_accept_format_arguments() {
  let count = 3;
  bentley::info!("{} classrooms available", count);
  bentley::success!("done");
}

#[test]
fn test_init_twice_is_harmless() {
  init(0);
  init(3);
}
